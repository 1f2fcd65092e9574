use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};
use log::debug;

use super::{CompositeMode, RenderSurface, SurfaceSize, Viewport};

/// Software surface backed by an unpremultiplied RGBA buffer.
///
/// Paths are rasterized as round-capped polylines with one pixel of
/// anti-aliasing. Coverage is accumulated over the whole path before blending,
/// so overlapping segments of the same path do not darken each other.
pub struct RasterSurface {
    viewport: Viewport,
    image: RgbaImage,
    version: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("size", &self.size())
            .field("viewport", &self.viewport.get())
            .field("version", &self.version)
            .finish()
    }
}

impl RasterSurface {
    /// Create an empty (0x0) surface that measures itself against `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            image: RgbaImage::new(0, 0),
            version: 0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Bumped on every change to the pixels
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Per-pixel coverage of the path inside its clipped bounding box.
    fn coverage(&self, points: &[Pos2], radius: f32) -> Option<Coverage> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 || points.is_empty() {
            return None;
        }

        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let pad = radius + 1.0;
        let x0 = (min_x - pad).floor().max(0.0) as u32;
        let y0 = (min_y - pad).floor().max(0.0) as u32;
        let x1 = ((max_x + pad).ceil().max(0.0) as u32).min(w);
        let y1 = ((max_y + pad).ceil().max(0.0) as u32).min(h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let mut cov = Coverage {
            x0,
            y0,
            width: x1 - x0,
            values: vec![0.0; ((x1 - x0) * (y1 - y0)) as usize],
        };

        let segments: Vec<(Pos2, Pos2)> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|s| (s[0], s[1])).collect()
        };

        for (a, b) in segments {
            let sx0 = ((a.x.min(b.x) - pad).floor().max(x0 as f32)) as u32;
            let sy0 = ((a.y.min(b.y) - pad).floor().max(y0 as f32)) as u32;
            let sx1 = ((a.x.max(b.x) + pad).ceil().max(0.0) as u32).min(x1);
            let sy1 = ((a.y.max(b.y) + pad).ceil().max(0.0) as u32).min(y1);

            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let dist = distance_to_segment(center, a, b);
                    let c = (radius + 0.5 - dist).clamp(0.0, 1.0);
                    if c > 0.0 {
                        let slot = cov.slot(x, y);
                        if c > *slot {
                            *slot = c;
                        }
                    }
                }
            }
        }

        Some(cov)
    }
}

struct Coverage {
    x0: u32,
    y0: u32,
    width: u32,
    values: Vec<f32>,
}

impl Coverage {
    fn slot(&mut self, x: u32, y: u32) -> &mut f32 {
        let idx = ((y - self.y0) * self.width + (x - self.x0)) as usize;
        &mut self.values[idx]
    }

    fn iter(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        self.values.iter().enumerate().filter_map(|(i, &c)| {
            (c > 0.0).then(|| {
                let i = i as u32;
                (self.x0 + i % self.width, self.y0 + i / self.width, c)
            })
        })
    }
}

impl RenderSurface for RasterSurface {
    fn measure(&self) -> SurfaceSize {
        self.viewport.get()
    }

    fn resize(&mut self, size: SurfaceSize) {
        debug!("resizing raster surface to {}x{}", size.width, size.height);
        self.image = RgbaImage::new(size.width, size.height);
        self.touch();
    }

    fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
        self.touch();
    }

    fn stroke_path(
        &mut self,
        points: &[Pos2],
        width: f32,
        color: Color32,
        alpha: f32,
        mode: CompositeMode,
    ) {
        // Widths are logical pixels; the buffer is physical.
        let width = width * self.viewport.scale();
        let Some(coverage) = self.coverage(points, width.max(1.0) / 2.0) else {
            return;
        };
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let source_alpha = alpha.clamp(0.0, 1.0) * (a as f32 / 255.0);

        for (x, y, c) in coverage.iter() {
            let dst = self.image.get_pixel_mut(x, y);
            let sa = source_alpha * c;
            dst.0 = match mode {
                CompositeMode::Normal => source_over(dst.0, [r, g, b], sa),
                CompositeMode::Subtract => destination_out(dst.0, sa),
            };
        }
        self.touch();
    }

    fn size(&self) -> SurfaceSize {
        let (width, height) = self.image.dimensions();
        SurfaceSize::new(width, height)
    }
}

fn source_over(dst: [u8; 4], src: [u8; 3], sa: f32) -> [u8; 4] {
    let da = dst[3] as f32 / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mix = |s: u8, d: u8| {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa;
        v.round().clamp(0.0, 255.0) as u8
    };
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (oa * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

fn destination_out(dst: [u8; 4], sa: f32) -> [u8; 4] {
    let a = (dst[3] as f32 * (1.0 - sa)).round().clamp(0.0, 255.0) as u8;
    if a == 0 {
        [0, 0, 0, 0]
    } else {
        [dst[0], dst[1], dst[2], a]
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
