use crate::surface::SurfaceTextures;

/// Transparent full-window canvas showing the overlay's surfaces.
pub fn central_panel(ctx: &egui::Context, textures: &SurfaceTextures) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let canvas_rect = ctx.screen_rect();
            textures.paint(ui.painter(), canvas_rect);
        });
}
