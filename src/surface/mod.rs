use egui::{Color32, Pos2};
use std::cell::Cell;
use std::rc::Rc;

mod raster;
mod texture;

pub use raster::RasterSurface;
pub use texture::SurfaceTextures;

/// How a stroke combines with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Paint over existing pixels
    Normal,
    /// Remove existing pixels where the stroke lands
    Subtract,
}

/// Pixel dimensions of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A 2D drawing target the overlay can clear and stroke paths onto.
pub trait RenderSurface {
    /// The size the surface should have right now (e.g. the window's size).
    fn measure(&self) -> SurfaceSize;

    fn resize(&mut self, size: SurfaceSize);

    fn clear(&mut self);

    /// Draw a round-capped path. `points` are surface pixels; `width` is in
    /// logical pixels, so it looks the same on any display scale.
    fn stroke_path(
        &mut self,
        points: &[Pos2],
        width: f32,
        color: Color32,
        alpha: f32,
        mode: CompositeMode,
    );

    /// Resize to the measured size if it changed. Returns true if resized.
    fn fit(&mut self) -> bool {
        let size = self.measure();
        if size == self.size() {
            return false;
        }
        self.resize(size);
        true
    }

    /// Current backing size
    fn size(&self) -> SurfaceSize;
}

/// The two surfaces an overlay window draws on.
#[derive(Debug)]
pub struct SurfacePair<S> {
    /// Holds every committed mark
    pub accumulated: S,
    /// Holds only the mark being drawn
    pub ephemeral: S,
}

impl<S: RenderSurface> SurfacePair<S> {
    pub fn new(accumulated: S, ephemeral: S) -> Self {
        Self {
            accumulated,
            ephemeral,
        }
    }

    pub fn clear(&mut self) {
        self.accumulated.clear();
        self.ephemeral.clear();
    }

    pub fn fit(&mut self) {
        self.accumulated.fit();
        self.ephemeral.fit();
    }
}

/// Shared, single-threaded handle to the size the surfaces should measure
/// and the number of physical pixels per logical pixel.
///
/// The host updates it whenever its window changes size or scale, so a
/// measurement always returns the dimensions current at the time it is taken.
#[derive(Debug, Clone)]
pub struct Viewport {
    size: Rc<Cell<SurfaceSize>>,
    scale: Rc<Cell<f32>>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(SurfaceSize::default())
    }
}

impl Viewport {
    pub fn new(size: SurfaceSize) -> Self {
        Self::with_scale(size, 1.0)
    }

    pub fn with_scale(size: SurfaceSize, scale: f32) -> Self {
        Self {
            size: Rc::new(Cell::new(size)),
            scale: Rc::new(Cell::new(scale)),
        }
    }

    pub fn get(&self) -> SurfaceSize {
        self.size.get()
    }

    /// Returns true if the size changed.
    pub fn set(&self, size: SurfaceSize) -> bool {
        self.size.replace(size) != size
    }

    /// Physical pixels per logical pixel
    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn set_scale(&self, scale: f32) {
        self.scale.set(scale);
    }
}
