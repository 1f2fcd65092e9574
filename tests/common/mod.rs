#![allow(dead_code)]

use egui::{Color32, Pos2};
use fade_overlay::config::{FadeConfig, OverlayConfig};
use fade_overlay::host::HostWindow;
use fade_overlay::smoothing::Smoother;
use fade_overlay::surface::{CompositeMode, RenderSurface, SurfacePair, SurfaceSize, Viewport};
use std::cell::RefCell;
use std::rc::Rc;

pub const EPS: f32 = 1e-3;

/// One call made on a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Resize(SurfaceSize),
    Clear,
    Stroke {
        points: usize,
        width: f32,
        color: Color32,
        alpha: f32,
        mode: CompositeMode,
    },
}

/// Surface that only remembers what was asked of it
#[derive(Debug)]
pub struct RecordingSurface {
    viewport: Viewport,
    size: SurfaceSize,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            size: SurfaceSize::default(),
            ops: Vec::new(),
        }
    }

    /// Strokes drawn since the last clear
    pub fn visible_strokes(&self) -> Vec<&Op> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, Op::Clear | Op::Resize(_)))
            .map_or(0, |i| i + 1);
        self.ops[start..].iter().collect()
    }

    pub fn was_cleared(&self) -> bool {
        self.ops.contains(&Op::Clear)
    }
}

impl RenderSurface for RecordingSurface {
    fn measure(&self) -> SurfaceSize {
        self.viewport.get()
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.ops.push(Op::Resize(size));
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32, alpha: f32, mode: CompositeMode) {
        self.ops.push(Op::Stroke {
            points: points.len(),
            width,
            color,
            alpha,
            mode,
        });
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }
}

pub fn surfaces(viewport: &Viewport) -> SurfacePair<RecordingSurface> {
    SurfacePair::new(
        RecordingSurface::new(viewport.clone()),
        RecordingSurface::new(viewport.clone()),
    )
}

/// Host that counts capability calls
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub activations: usize,
    pub deactivations: usize,
}

impl HostWindow for RecordingHost {
    fn activate(&mut self) {
        self.activations += 1;
    }

    fn deactivate(&mut self) {
        self.deactivations += 1;
    }
}

/// Smoother that records every input and hands it back unchanged
#[derive(Debug, Clone, Default)]
pub struct RecordingSmoother {
    pub calls: Rc<RefCell<Vec<Vec<Pos2>>>>,
}

impl Smoother for RecordingSmoother {
    fn smooth(&self, points: &[Pos2]) -> Vec<Pos2> {
        self.calls.borrow_mut().push(points.to_vec());
        points.to_vec()
    }
}

pub fn fade_config(enabled: bool) -> FadeConfig {
    FadeConfig {
        enabled,
        delay: 0.5,
        duration: 2.0,
        tick_interval: 0.016,
    }
}

pub fn config(fading: bool) -> OverlayConfig {
    OverlayConfig {
        fade: fade_config(fading),
        ..OverlayConfig::default()
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}
