use egui::{Color32, Pos2};
use log::debug;

use crate::error::EngineError;
use crate::mark::{Mark, MarkId, ToolKind};
use crate::smoothing::{CardinalSpline, Smoother};
use crate::surface::RenderSurface;

/// Color and width given to the next mark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color32,
    pub size: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color32::RED,
            size: 4.0,
        }
    }
}

/// What `DrawingEngine::clear` throws away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    /// Only the committed marks; the redo stack and current mark survive
    Committed,
    /// Committed marks, the current mark and the redo stack
    Everything,
}

/// Owns every mark of one overlay window and knows how to draw them.
///
/// A mark lives in exactly one place at a time: `current` while being drawn,
/// `marks` once committed (in draw order, last on top), or `redo_stack` after
/// being undone.
pub struct DrawingEngine {
    marks: Vec<Mark>,
    current: Option<Mark>,
    redo_stack: Vec<Mark>,
    brush: Brush,
    fade_delay: f32,
    smoother: Box<dyn Smoother>,
}

impl std::fmt::Debug for DrawingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingEngine")
            .field("marks", &self.marks.len())
            .field("current", &self.current.as_ref().map(Mark::id))
            .field("redo_stack", &self.redo_stack.len())
            .field("brush", &self.brush)
            .field("fade_delay", &self.fade_delay)
            .finish()
    }
}

impl Default for DrawingEngine {
    fn default() -> Self {
        Self::new(Brush::default(), 0.0)
    }
}

impl DrawingEngine {
    pub fn new(brush: Brush, fade_delay: f32) -> Self {
        Self::with_smoother(brush, fade_delay, CardinalSpline::default())
    }

    pub fn with_smoother(brush: Brush, fade_delay: f32, smoother: impl Smoother + 'static) -> Self {
        Self {
            marks: Vec::new(),
            current: None,
            redo_stack: Vec::new(),
            brush,
            fade_delay: fade_delay.max(0.0),
            smoother: Box::new(smoother),
        }
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Affects only marks started after this call
    pub fn set_color(&mut self, color: Color32) {
        self.brush.color = color;
    }

    /// Affects only marks started after this call
    pub fn set_size(&mut self, size: f32) {
        self.brush.size = size;
    }

    /// Committed marks in draw order
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn current(&self) -> Option<&Mark> {
        self.current.as_ref()
    }

    pub fn redo_stack(&self) -> &[Mark] {
        &self.redo_stack
    }

    pub fn has_marks(&self) -> bool {
        !self.marks.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Start a new current mark at `point` with the brush's color and size.
    pub fn begin_mark(&mut self, point: Pos2, tool: ToolKind) -> Result<MarkId, EngineError> {
        if self.current.is_some() {
            return Err(EngineError::MarkInProgress);
        }
        let mark = Mark::new(point, tool, self.brush.color, self.brush.size, self.fade_delay);
        let id = mark.id();
        self.current = Some(mark);
        Ok(id)
    }

    /// Append a raw sample to the current mark. Smoothing waits for completion.
    pub fn append_point(&mut self, point: Pos2) -> Result<(), EngineError> {
        let mark = self.current.as_mut().ok_or(EngineError::NoCurrentMark)?;
        mark.push_point(point);
        Ok(())
    }

    /// Smooth the current mark once, commit it on top of the others, and
    /// forget anything that could have been redone.
    pub fn complete_mark(&mut self) -> Result<MarkId, EngineError> {
        let mut mark = self.current.take().ok_or(EngineError::NoCurrentMark)?;
        let smoothed = self.smoother.smooth(mark.points());
        mark.replace_points(smoothed);

        let id = mark.id();
        debug!(
            "committed {} mark {} ({} points)",
            mark.tool().name(),
            id.get(),
            mark.points().len()
        );
        self.marks.push(mark);
        self.redo_stack.clear();
        Ok(id)
    }

    /// Drop the current mark without committing it.
    pub fn discard_current(&mut self) -> Option<Mark> {
        self.current.take()
    }

    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) -> Result<MarkId, EngineError> {
        let mark = self.marks.pop().ok_or(EngineError::NothingToUndo)?;
        let id = mark.id();
        debug!("undo mark {}", id.get());
        self.redo_stack.push(mark);
        Ok(id)
    }

    pub fn redo(&mut self) -> Result<MarkId, EngineError> {
        let mark = self.redo_stack.pop().ok_or(EngineError::NothingToRedo)?;
        let id = mark.id();
        debug!("redo mark {}", id.get());
        self.marks.push(mark);
        Ok(id)
    }

    pub fn clear(&mut self, scope: ClearScope) {
        debug!("clearing {scope:?} ({} committed marks)", self.marks.len());
        self.marks.clear();
        if scope == ClearScope::Everything {
            self.current = None;
            self.redo_stack.clear();
        }
    }

    /// Lower the strength of every committed mark by `amount` and drop the
    /// ones that are fully faded. Returns how many were dropped.
    pub fn decay(&mut self, amount: f32) -> usize {
        for mark in &mut self.marks {
            mark.decay(amount);
        }
        let before = self.marks.len();
        self.marks.retain(|mark| !mark.is_faded());
        before - self.marks.len()
    }

    /// Redraw every committed mark, oldest first.
    pub fn render_committed<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for mark in &self.marks {
            surface.stroke_path(
                mark.points(),
                mark.size(),
                mark.color(),
                mark.alpha(),
                mark.tool().composite_mode(),
            );
        }
    }

    /// Redraw the mark in progress, smoothed but never faded.
    pub fn render_current<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        if let Some(mark) = &self.current {
            let preview = self.smoother.smooth(mark.points());
            surface.stroke_path(
                &preview,
                mark.size(),
                mark.color(),
                1.0,
                mark.tool().composite_mode(),
            );
        }
    }
}
