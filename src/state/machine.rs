//! The interaction state machine of the overlay.
//!
//! `transition` is a pure function from the current [`OverlayState`] and an
//! incoming event to the next state plus the ordered list of [`Action`]s that
//! realize it. It never touches marks or surfaces itself, which keeps the
//! rules testable without any rendering.
//!
//! ```text
//!  loading ──SurfacesReady──► ready ──SurfacesTornDown──► loading
//!
//!  ready:
//!                 EnteredToolPalette            SelectedTool
//!    ┌──────────┐ ─────────────────► ┌───────────┐ ───────────► ┌────────┐
//!    │ inactive │                    │ selecting │              │ active │
//!    └──────────┘ ◄───────────────── └───────────┘ ◄─────────── └────────┘
//!       ▲   │      LeftToolPalette /                ClearMedium     │
//!       │   │      PointerDown                                      │
//!       │   └──────────────────────── Activate ────────────────────►│
//!       └────────────────────── Deactivate / ClearHard ─────────────┘
//!
//!  active (orthogonal):  tool  pencil ⇄ eraser
//!                        frame fixed  ⇄ dragging
//!                        draw  notDrawing ─PointerDown─► drawing ─PointerUp─► notDrawing
//! ```
//!
//! Color, size and fading selection are accepted in every state. A color
//! switches the tool back to pencil only while active.

use log::trace;

use super::{Action, Activation, DrawSession, Frame, Lifecycle, OverlayState};
use crate::engine::ClearScope;
use crate::event::{OverlayEvent, PaletteItem};
use crate::mark::ToolKind;

/// Facts about the marks that guard some transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guards {
    /// The committed collection is not empty
    pub has_marks: bool,
    /// The redo stack is not empty
    pub can_redo: bool,
}

/// Result of feeding one event to the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: OverlayState,
    pub actions: Vec<Action>,
    /// False if the event is not legal in the current state and was ignored
    pub handled: bool,
}

struct Step {
    state: OverlayState,
    actions: Vec<Action>,
}

impl Step {
    fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    fn extend(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions.extend(actions);
    }

    fn enter_inactive(&mut self) {
        self.state.activation = Activation::Inactive;
        self.extend([Action::DiscardCurrent, Action::DeactivateHost]);
    }

    fn enter_selecting(&mut self) {
        self.state.activation = Activation::Selecting;
        self.push(Action::ActivateHost);
    }

    fn enter_active(&mut self) {
        self.state.activation = Activation::Active;
        self.extend([
            Action::ActivateHost,
            Action::FitSurfaces,
            Action::RenderCommitted,
            Action::RenderCurrent,
        ]);
    }

    /// Reset the regions nested in `active`. The tool survives.
    fn leave_active(&mut self) {
        if self.state.draw == DrawSession::Drawing {
            self.extend([Action::DiscardCurrent, Action::RenderCurrent]);
        }
        self.state.draw = DrawSession::NotDrawing;
        self.state.frame = Frame::Fixed;
    }

    fn clear_all(&mut self) {
        self.state.draw = DrawSession::NotDrawing;
        self.state.tool = ToolKind::Pencil;
        self.extend([
            Action::ClearMarks(ClearScope::Everything),
            Action::RenderCommitted,
            Action::RenderCurrent,
        ]);
    }

    fn apply_item(&mut self, item: PaletteItem) {
        match item {
            PaletteItem::Pencil => self.state.tool = ToolKind::Pencil,
            PaletteItem::Eraser => self.state.tool = ToolKind::Eraser,
            PaletteItem::Color(color) => {
                self.state.tool = ToolKind::Pencil;
                self.push(Action::SetColor(color));
            }
            PaletteItem::Size(size) => self.push(Action::SetSize(size)),
        }
    }
}

/// Compute the next state and the actions for `event`.
pub fn transition<S>(state: &OverlayState, event: &OverlayEvent<S>, guards: Guards) -> Transition {
    let mut step = Step {
        state: *state,
        actions: Vec::new(),
    };
    let handled = apply(&mut step, event, guards);
    if !handled {
        trace!("ignoring {} in {}", event.name(), state.describe());
    }
    Transition {
        state: step.state,
        actions: step.actions,
        handled,
    }
}

fn apply<S>(step: &mut Step, event: &OverlayEvent<S>, guards: Guards) -> bool {
    match event {
        OverlayEvent::SelectedColor(color) => {
            // The tool region only exists while active
            if step.state.is_active() {
                step.apply_item(PaletteItem::Color(*color));
            } else {
                step.push(Action::SetColor(*color));
            }
            return true;
        }
        OverlayEvent::SelectedSize(size) => {
            step.apply_item(PaletteItem::Size(*size));
            return true;
        }
        OverlayEvent::SetFading(enabled) => {
            step.push(Action::SetFading(*enabled));
            return true;
        }
        _ => {}
    }

    match step.state.lifecycle {
        Lifecycle::Loading => match event {
            OverlayEvent::SurfacesReady(_) => {
                step.state.lifecycle = Lifecycle::Ready;
                step.extend([Action::BindSurfaces, Action::ClearSurfaces]);
                step.enter_inactive();
                true
            }
            _ => false,
        },
        Lifecycle::Ready => {
            if let OverlayEvent::SurfacesTornDown = event {
                step.leave_active();
                step.state.activation = Activation::Inactive;
                step.state.lifecycle = Lifecycle::Loading;
                step.extend([
                    Action::ClearMarks(ClearScope::Everything),
                    Action::ReleaseSurfaces,
                ]);
                return true;
            }
            match step.state.activation {
                Activation::Inactive => apply_inactive(step, event),
                Activation::Selecting => apply_selecting(step, event),
                Activation::Active => apply_active(step, event, guards),
            }
        }
    }
}

fn apply_inactive<S>(step: &mut Step, event: &OverlayEvent<S>) -> bool {
    match event {
        OverlayEvent::Activate => step.enter_active(),
        OverlayEvent::EnteredToolPalette => step.enter_selecting(),
        _ => return false,
    }
    true
}

fn apply_selecting<S>(step: &mut Step, event: &OverlayEvent<S>) -> bool {
    match event {
        OverlayEvent::SelectedTool(item) => {
            step.apply_item(*item);
            step.enter_active();
        }
        OverlayEvent::LeftToolPalette | OverlayEvent::PointerDown(_) => step.enter_inactive(),
        _ => return false,
    }
    true
}

fn apply_active<S>(step: &mut Step, event: &OverlayEvent<S>, guards: Guards) -> bool {
    let drawing = step.state.draw == DrawSession::Drawing;
    match event {
        OverlayEvent::Deactivate => {
            step.leave_active();
            step.enter_inactive();
        }

        OverlayEvent::SelectedTool(item) => step.apply_item(*item),
        OverlayEvent::SelectedEraser => step.state.tool = ToolKind::Eraser,
        OverlayEvent::SelectedPencil => step.state.tool = ToolKind::Pencil,

        OverlayEvent::StartDrag => step.state.frame = Frame::Dragging,
        OverlayEvent::StopDrag => step.state.frame = Frame::Fixed,

        OverlayEvent::PointerDown(point) if !drawing => {
            step.state.draw = DrawSession::Drawing;
            step.extend([
                Action::ClearRedo,
                Action::BeginMark {
                    point: *point,
                    tool: step.state.tool,
                },
                Action::RenderCurrent,
            ]);
        }
        OverlayEvent::PointerMove(point) if drawing => {
            step.extend([Action::AppendPoint(*point), Action::RenderCurrent]);
        }
        OverlayEvent::PointerUp if drawing => {
            step.state.draw = DrawSession::NotDrawing;
            step.extend([
                Action::CompleteMark,
                Action::RenderCurrent,
                Action::RenderCommitted,
            ]);
        }

        OverlayEvent::Undo if guards.has_marks => {
            step.extend([Action::Undo, Action::RenderCommitted, Action::RenderCurrent]);
        }
        OverlayEvent::Redo if guards.can_redo => {
            step.extend([Action::Redo, Action::RenderCommitted, Action::RenderCurrent]);
        }
        OverlayEvent::Resized => {
            step.extend([
                Action::FitSurfaces,
                Action::RenderCommitted,
                Action::RenderCurrent,
            ]);
        }

        OverlayEvent::ClearSoft => step.clear_all(),
        OverlayEvent::ClearMedium => {
            step.clear_all();
            step.leave_active();
            step.enter_selecting();
        }
        OverlayEvent::ClearHard => {
            step.clear_all();
            step.leave_active();
            step.enter_inactive();
        }

        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    type Event = OverlayEvent<()>;

    fn ready() -> OverlayState {
        OverlayState {
            lifecycle: Lifecycle::Ready,
            ..OverlayState::default()
        }
    }

    fn active() -> OverlayState {
        OverlayState {
            activation: Activation::Active,
            ..ready()
        }
    }

    fn run(state: OverlayState, event: Event) -> Transition {
        transition(&state, &event, Guards::default())
    }

    #[test]
    fn loading_ignores_everything_but_surfaces_ready() {
        let t = run(OverlayState::default(), OverlayEvent::Activate);
        assert!(!t.handled);
        assert_eq!(t.state, OverlayState::default());
        assert!(t.actions.is_empty());
    }

    #[test]
    fn surfaces_ready_binds_clears_and_deactivates() {
        let t = run(
            OverlayState::default(),
            OverlayEvent::SurfacesReady(crate::surface::SurfacePair {
                accumulated: (),
                ephemeral: (),
            }),
        );
        assert_eq!(t.state, ready());
        assert_eq!(
            t.actions,
            vec![
                Action::BindSurfaces,
                Action::ClearSurfaces,
                Action::DiscardCurrent,
                Action::DeactivateHost
            ]
        );
    }

    #[test]
    fn color_is_accepted_while_loading() {
        let t = run(OverlayState::default(), OverlayEvent::SelectedColor(Color32::BLUE));
        assert!(t.handled);
        assert_eq!(t.actions, vec![Action::SetColor(Color32::BLUE)]);
    }

    #[test]
    fn activating_fits_and_redraws() {
        let t = run(ready(), OverlayEvent::Activate);
        assert_eq!(t.state.activation, Activation::Active);
        assert_eq!(
            t.actions,
            vec![
                Action::ActivateHost,
                Action::FitSurfaces,
                Action::RenderCommitted,
                Action::RenderCurrent
            ]
        );
    }

    #[test]
    fn palette_selection_activates_with_item() {
        let selecting = run(ready(), OverlayEvent::EnteredToolPalette).state;
        assert_eq!(selecting.activation, Activation::Selecting);

        let t = run(selecting, OverlayEvent::SelectedTool(PaletteItem::Eraser));
        assert_eq!(t.state.activation, Activation::Active);
        assert_eq!(t.state.tool, ToolKind::Eraser);
    }

    #[test]
    fn pointer_down_in_palette_leaves_it() {
        let selecting = OverlayState {
            activation: Activation::Selecting,
            ..ready()
        };
        let t = run(selecting, OverlayEvent::PointerDown(Pos2::ZERO));
        assert_eq!(t.state.activation, Activation::Inactive);
        assert!(!t.actions.iter().any(|a| matches!(a, Action::BeginMark { .. })));
    }

    #[test]
    fn draw_session_sequence() {
        let down = run(active(), OverlayEvent::PointerDown(Pos2::new(1.0, 2.0)));
        assert_eq!(down.state.draw, DrawSession::Drawing);
        assert_eq!(
            down.actions,
            vec![
                Action::ClearRedo,
                Action::BeginMark {
                    point: Pos2::new(1.0, 2.0),
                    tool: ToolKind::Pencil
                },
                Action::RenderCurrent
            ]
        );

        let moved = run(down.state, OverlayEvent::PointerMove(Pos2::new(3.0, 4.0)));
        assert_eq!(
            moved.actions,
            vec![Action::AppendPoint(Pos2::new(3.0, 4.0)), Action::RenderCurrent]
        );

        let up = run(moved.state, OverlayEvent::PointerUp);
        assert_eq!(up.state.draw, DrawSession::NotDrawing);
        assert_eq!(up.actions[0], Action::CompleteMark);
    }

    #[test]
    fn pointer_move_without_session_is_ignored() {
        let t = run(active(), OverlayEvent::PointerMove(Pos2::ZERO));
        assert!(!t.handled);
        let t = run(active(), OverlayEvent::PointerUp);
        assert!(!t.handled);
    }

    #[test]
    fn second_pointer_down_is_ignored_while_drawing() {
        let drawing = OverlayState {
            draw: DrawSession::Drawing,
            ..active()
        };
        assert!(!run(drawing, OverlayEvent::PointerDown(Pos2::ZERO)).handled);
    }

    #[test]
    fn undo_and_redo_are_guarded() {
        assert!(!run(active(), OverlayEvent::Undo).handled);
        assert!(!run(active(), OverlayEvent::Redo).handled);

        let guards = Guards {
            has_marks: true,
            can_redo: true,
        };
        let undo: Event = OverlayEvent::Undo;
        let t = transition(&active(), &undo, guards);
        assert_eq!(t.actions[0], Action::Undo);
        let redo: Event = OverlayEvent::Redo;
        let t = transition(&active(), &redo, guards);
        assert_eq!(t.actions[0], Action::Redo);
    }

    #[test]
    fn color_forces_pencil() {
        let eraser = OverlayState {
            tool: ToolKind::Eraser,
            ..active()
        };
        let t = run(eraser, OverlayEvent::SelectedColor(Color32::GREEN));
        assert_eq!(t.state.tool, ToolKind::Pencil);
    }

    #[test]
    fn color_while_inactive_keeps_tool() {
        let eraser = OverlayState {
            tool: ToolKind::Eraser,
            ..ready()
        };
        let t = run(eraser, OverlayEvent::SelectedColor(Color32::GREEN));
        assert!(t.handled);
        assert_eq!(t.state.tool, ToolKind::Eraser);
        assert_eq!(t.actions, vec![Action::SetColor(Color32::GREEN)]);
    }

    #[test]
    fn palette_item_while_active_keeps_activation() {
        let eraser = OverlayState {
            tool: ToolKind::Eraser,
            ..active()
        };
        let t = run(eraser, OverlayEvent::SelectedTool(PaletteItem::Color(Color32::BLUE)));
        assert!(t.handled);
        assert_eq!(t.state.activation, Activation::Active);
        assert_eq!(t.state.tool, ToolKind::Pencil);
        assert_eq!(t.actions, vec![Action::SetColor(Color32::BLUE)]);
    }

    #[test]
    fn clears_differ_only_in_activation() {
        let base = OverlayState {
            tool: ToolKind::Eraser,
            frame: Frame::Dragging,
            draw: DrawSession::Drawing,
            ..active()
        };

        let soft = run(base, OverlayEvent::ClearSoft);
        let medium = run(base, OverlayEvent::ClearMedium);
        let hard = run(base, OverlayEvent::ClearHard);

        for t in [&soft, &medium, &hard] {
            assert_eq!(t.state.tool, ToolKind::Pencil);
            assert_eq!(t.state.draw, DrawSession::NotDrawing);
            assert!(t.actions.contains(&Action::ClearMarks(ClearScope::Everything)));
        }
        assert_eq!(soft.state.activation, Activation::Active);
        assert_eq!(medium.state.activation, Activation::Selecting);
        assert_eq!(hard.state.activation, Activation::Inactive);
        assert!(hard.actions.contains(&Action::DeactivateHost));
    }

    #[test]
    fn deactivate_mid_stroke_discards_current() {
        let drawing = OverlayState {
            draw: DrawSession::Drawing,
            frame: Frame::Dragging,
            ..active()
        };
        let t = run(drawing, OverlayEvent::Deactivate);
        assert_eq!(t.state.activation, Activation::Inactive);
        assert_eq!(t.state.frame, Frame::Fixed);
        assert_eq!(t.state.draw, DrawSession::NotDrawing);
        assert!(t.actions.contains(&Action::DiscardCurrent));
    }

    #[test]
    fn drag_is_independent_of_drawing() {
        let t = run(active(), OverlayEvent::StartDrag);
        assert_eq!(t.state.frame, Frame::Dragging);
        assert!(t.actions.is_empty());
        let t = run(t.state, OverlayEvent::StopDrag);
        assert_eq!(t.state.frame, Frame::Fixed);
    }

    #[test]
    fn teardown_returns_to_loading() {
        let t = run(active(), OverlayEvent::SurfacesTornDown);
        assert_eq!(t.state.lifecycle, Lifecycle::Loading);
        assert_eq!(t.actions.last(), Some(&Action::ReleaseSurfaces));
    }
}
