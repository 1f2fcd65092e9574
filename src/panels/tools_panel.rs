use egui::{Color32, Pos2, Rect};

use crate::components::ToolButton;
use crate::event::{OverlayEvent, PaletteItem};
use crate::mark::ToolKind;

/// What the palette needs to know to draw itself for one frame.
#[derive(Debug, Clone)]
pub struct PaletteView<'a> {
    pub tool: ToolKind,
    pub color: Color32,
    pub size: f32,
    pub colors: &'a [Color32],
    pub sizes: &'a [f32],
    pub can_undo: bool,
    pub can_redo: bool,
    pub fading: bool,
    pub active: bool,
}

/// Floating tool palette. Clicks become overlay events; the palette itself
/// changes nothing. `pos` is the palette's top-left corner and moves while
/// the grip is dragged. Returns the area the palette covers.
pub fn tools_panel<S>(
    ctx: &egui::Context,
    view: &PaletteView<'_>,
    pos: &mut Pos2,
    events: &mut Vec<OverlayEvent<S>>,
) -> Rect {
    let response = egui::Area::new(egui::Id::new("tool_palette"))
        .fixed_pos(*pos)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let grip = ui.add(egui::Label::new("✥").sense(egui::Sense::drag()));
                if grip.drag_started() {
                    events.push(OverlayEvent::StartDrag);
                }
                if grip.dragged() {
                    *pos += grip.drag_delta();
                }
                if grip.drag_stopped() {
                    events.push(OverlayEvent::StopDrag);
                }

                ui.horizontal(|ui| {
                    for (item, tool) in [(PaletteItem::Pencil, ToolKind::Pencil), (PaletteItem::Eraser, ToolKind::Eraser)] {
                        let selected = view.active && view.tool == tool;
                        if ToolButton::new(item, selected).show(ui).clicked() {
                            log::debug!("palette: {}", item.label());
                            events.push(OverlayEvent::SelectedTool(item));
                        }
                    }
                });

                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    for &color in view.colors {
                        let item = PaletteItem::Color(color);
                        if ToolButton::new(item, view.color == color).show(ui).clicked() {
                            events.push(OverlayEvent::SelectedTool(item));
                        }
                    }
                });

                ui.horizontal(|ui| {
                    for &size in view.sizes {
                        let item = PaletteItem::Size(size);
                        if ToolButton::new(item, view.size == size).show(ui).clicked() {
                            events.push(OverlayEvent::SelectedTool(item));
                        }
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.add_enabled(view.active && view.can_undo, egui::Button::new("Undo")).clicked() {
                        events.push(OverlayEvent::Undo);
                    }
                    if ui.add_enabled(view.active && view.can_redo, egui::Button::new("Redo")).clicked() {
                        events.push(OverlayEvent::Redo);
                    }
                    if ui.add_enabled(view.active, egui::Button::new("Clear")).clicked() {
                        events.push(OverlayEvent::ClearSoft);
                    }
                });

                let mut fading = view.fading;
                if ui.checkbox(&mut fading, "Fade marks").changed() {
                    events.push(OverlayEvent::SetFading(fading));
                }

                if view.active && ui.button("Hide").clicked() {
                    events.push(OverlayEvent::Deactivate);
                }
            });
        });

    response.response.rect
}
