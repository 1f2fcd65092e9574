use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

use crate::event::OverlayEvent;

/// Keyboard shortcut for `key` pressed with `modifiers`. `active` says whether
/// the overlay is currently drawing-enabled, which decides what the toggle
/// shortcut does.
pub fn shortcut<S>(key: Key, modifiers: Modifiers, active: bool) -> Option<OverlayEvent<S>> {
    let event = match key {
        Key::Z if modifiers.command && modifiers.shift => OverlayEvent::Redo,
        Key::Z if modifiers.command => OverlayEvent::Undo,
        Key::Y if modifiers.command => OverlayEvent::Redo,
        Key::D if modifiers.command => {
            if active {
                OverlayEvent::Deactivate
            } else {
                OverlayEvent::Activate
            }
        }
        Key::Delete => OverlayEvent::ClearSoft,
        Key::Backspace => OverlayEvent::ClearMedium,
        Key::Escape => OverlayEvent::ClearHard,
        Key::E if modifiers.is_none() => OverlayEvent::SelectedEraser,
        Key::P if modifiers.is_none() => OverlayEvent::SelectedPencil,
        _ => return None,
    };
    Some(event)
}

/// Turns raw egui input into overlay events.
///
/// Pointer positions are converted to physical pixels so they line up with
/// the raster surfaces.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    palette_rect: Option<Rect>,
    over_palette: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the tool palette was drawn this frame
    pub fn set_palette_rect(&mut self, rect: Option<Rect>) {
        self.palette_rect = rect;
    }

    fn is_over_palette(&self, pos: Option<Pos2>) -> bool {
        match (self.palette_rect, pos) {
            (Some(rect), Some(pos)) => rect.contains(pos),
            _ => false,
        }
    }

    /// Collect the events of the current frame, in the order they should be
    /// handled.
    pub fn process_input<S>(&mut self, ctx: &Context, active: bool) -> Vec<OverlayEvent<S>> {
        let mut events = Vec::new();
        let ppp = ctx.pixels_per_point();

        ctx.input(|input| {
            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } = event
                {
                    events.extend(shortcut(*key, *modifiers, active));
                }
            }

            let hover = input.pointer.hover_pos();
            let over_palette = self.is_over_palette(hover);
            if over_palette != self.over_palette {
                self.over_palette = over_palette;
                events.push(if over_palette {
                    OverlayEvent::EnteredToolPalette
                } else {
                    OverlayEvent::LeftToolPalette
                });
            }

            let physical = |pos: Pos2| Pos2::new(pos.x * ppp, pos.y * ppp);

            if input.pointer.button_pressed(PointerButton::Primary) && !over_palette {
                if let Some(pos) = hover {
                    events.push(OverlayEvent::PointerDown(physical(pos)));
                }
            } else if input.pointer.button_down(PointerButton::Primary) {
                if let Some(pos) = hover {
                    if Some(pos) != self.last_pointer_pos {
                        events.push(OverlayEvent::PointerMove(physical(pos)));
                    }
                }
            }
            if input.pointer.button_released(PointerButton::Primary) {
                events.push(OverlayEvent::PointerUp);
            }

            self.last_pointer_pos = hover;
        });

        events
    }
}
