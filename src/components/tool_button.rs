use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui};

use crate::event::PaletteItem;

const BUTTON_SIZE: f32 = 32.0;
const HIGHLIGHT: Color32 = Color32::from_rgb(33, 150, 243);

/// Square palette button for one [`PaletteItem`].
pub struct ToolButton {
    pub item: PaletteItem,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(item: PaletteItem, selected: bool) -> Self {
        Self { item, selected }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(BUTTON_SIZE, BUTTON_SIZE), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let bg_color = if self.selected {
                Color32::from_rgb(100, 181, 246)
            } else if response.hovered() {
                Color32::from_gray(40)
            } else {
                Color32::from_gray(30)
            };
            painter.rect_filled(rect, 4.0, bg_color);

            let fg_color = if self.selected { Color32::BLACK } else { Color32::WHITE };
            match self.item {
                PaletteItem::Pencil => {
                    painter.text(rect.center(), Align2::CENTER_CENTER, "✏", FontId::proportional(20.0), fg_color);
                }
                PaletteItem::Eraser => {
                    painter.text(rect.center(), Align2::CENTER_CENTER, "⌫", FontId::proportional(20.0), fg_color);
                }
                PaletteItem::Color(color) => {
                    painter.rect_filled(rect.shrink(6.0), 2.0, color);
                }
                PaletteItem::Size(size) => {
                    let radius = (size * 0.5).clamp(1.0, BUTTON_SIZE * 0.5 - 4.0);
                    painter.circle_filled(rect.center(), radius, fg_color);
                }
            }

            if self.selected {
                painter.rect_stroke(rect, 4.0, Stroke::new(2.0, HIGHLIGHT));
            }
        }

        response.on_hover_text(self.item.label())
    }
}
