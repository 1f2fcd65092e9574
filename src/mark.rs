use egui::{Color32, Pos2};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::surface::CompositeMode;

/// Number of copies of the first sample a new mark starts with, so that even a
/// single click yields a path the smoother can work with.
pub const SEED_POINTS: usize = 4;

static NEXT_MARK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(u64);

impl MarkId {
    fn next() -> Self {
        Self(NEXT_MARK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// What a mark does to the pixels underneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
}

impl ToolKind {
    pub fn composite_mode(self) -> CompositeMode {
        match self {
            Self::Pencil => CompositeMode::Normal,
            Self::Eraser => CompositeMode::Subtract,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Eraser => "eraser",
        }
    }
}

/// One freehand stroke.
///
/// Width, color and tool are fixed when the mark is created. The points are
/// appended to while the mark is current, replaced once by their smoothed
/// version on completion, and never touched again.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    id: MarkId,
    size: f32,
    color: Color32,
    tool: ToolKind,
    points: Vec<Pos2>,
    strength: f32,
}

impl Mark {
    /// Start a mark at `origin` with `strength = 1 + fade_delay`.
    pub fn new(origin: Pos2, tool: ToolKind, color: Color32, size: f32, fade_delay: f32) -> Self {
        Self {
            id: MarkId::next(),
            size,
            color,
            tool,
            points: vec![origin; SEED_POINTS],
            strength: 1.0 + fade_delay.max(0.0),
        }
    }

    pub fn id(&self) -> MarkId {
        self.id
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == ToolKind::Eraser
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn is_faded(&self) -> bool {
        self.strength <= 0.0
    }

    /// Opacity used when drawing the committed mark. The fade delay keeps
    /// strength above 1 for a while, which renders as fully opaque.
    pub fn alpha(&self) -> f32 {
        ease_out(self.strength.clamp(0.0, 1.0))
    }

    pub(crate) fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub(crate) fn replace_points(&mut self, points: Vec<Pos2>) {
        self.points = points;
    }

    pub(crate) fn decay(&mut self, amount: f32) {
        self.strength -= amount;
    }
}

/// Quadratic ease-out: lingers near 1 and drops faster as `t` approaches 0.
pub fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}
