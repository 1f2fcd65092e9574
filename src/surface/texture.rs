use egui::{ColorImage, Context, Painter, Rect, TextureHandle, TextureOptions};

use super::{RasterSurface, RenderSurface, SurfacePair};

/// GPU copy of one raster surface, re-uploaded only when the raster changed.
#[derive(Default)]
struct CachedTexture {
    handle: Option<TextureHandle>,
    version: Option<u64>,
}

impl CachedTexture {
    fn sync(&mut self, name: &str, surface: &RasterSurface, ctx: &Context) {
        if self.version == Some(surface.version()) {
            return;
        }
        self.version = Some(surface.version());

        let size = surface.size();
        if size.is_empty() {
            self.handle = None;
            return;
        }
        let image = ColorImage::from_rgba_unmultiplied(
            [size.width as usize, size.height as usize],
            surface.image().as_raw(),
        );
        match &mut self.handle {
            Some(handle) => handle.set(image, TextureOptions::LINEAR),
            None => self.handle = Some(ctx.load_texture(name, image, TextureOptions::LINEAR)),
        }
    }

    fn paint(&self, painter: &Painter, rect: Rect) {
        if let Some(handle) = &self.handle {
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(handle.id(), rect, uv, egui::Color32::WHITE);
        }
    }
}

/// Textures for the accumulated and ephemeral surfaces of one overlay window
#[derive(Default)]
pub struct SurfaceTextures {
    accumulated: CachedTexture,
    ephemeral: CachedTexture,
}

impl std::fmt::Debug for SurfaceTextures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceTextures")
            .field("accumulated_version", &self.accumulated.version)
            .field("ephemeral_version", &self.ephemeral.version)
            .finish()
    }
}

impl SurfaceTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload any surface whose pixels changed since the last call.
    pub fn sync(&mut self, surfaces: &SurfacePair<RasterSurface>, ctx: &Context) {
        self.accumulated.sync("overlay_accumulated", &surfaces.accumulated, ctx);
        self.ephemeral.sync("overlay_ephemeral", &surfaces.ephemeral, ctx);
    }

    /// Paint the accumulated surface, then the ephemeral one on top.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        self.accumulated.paint(painter, rect);
        self.ephemeral.paint(painter, rect);
    }

    /// Drop the GPU textures, e.g. when the surfaces are torn down.
    pub fn release(&mut self) {
        *self = Self::default();
    }
}
