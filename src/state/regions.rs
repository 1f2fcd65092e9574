use serde::{Deserialize, Serialize};

use crate::mark::ToolKind;

/// Whether the host's drawing surfaces exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Loading,
    Ready,
}

/// Who gets the pointer: the overlay, its tool palette, or whatever is beneath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activation {
    /// Clicks pass through to the content under the overlay
    #[default]
    Inactive,
    /// The pointer is over the tool palette
    Selecting,
    /// Pointer input draws marks
    Active,
}

/// Overlay frame chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frame {
    #[default]
    Fixed,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawSession {
    #[default]
    NotDrawing,
    /// A pointer is down and a current mark exists
    Drawing,
}

/// Whether committed marks exist and whether they are aging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarksPhase {
    #[default]
    NoMarks,
    /// Marks exist and the fade scheduler is running
    Fading,
    /// Marks exist but fading is switched off
    NotFading,
}

impl MarksPhase {
    pub fn observe(has_marks: bool, fading_enabled: bool) -> Self {
        match (has_marks, fading_enabled) {
            (false, _) => Self::NoMarks,
            (true, true) => Self::Fading,
            (true, false) => Self::NotFading,
        }
    }
}

/// The full interaction state: one leaf per orthogonal region.
///
/// `tool`, `frame` and `draw` are only meaningful while `activation` is
/// `Active`; `activation` only while `lifecycle` is `Ready`. `marks` runs in
/// parallel to everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayState {
    pub lifecycle: Lifecycle,
    pub activation: Activation,
    pub tool: ToolKind,
    pub frame: Frame,
    pub draw: DrawSession,
    pub marks: MarksPhase,
}

impl OverlayState {
    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn is_active(&self) -> bool {
        self.is_ready() && self.activation == Activation::Active
    }

    pub fn is_drawing(&self) -> bool {
        self.is_active() && self.draw == DrawSession::Drawing
    }

    /// Short description for logs and debug UI
    pub fn describe(&self) -> String {
        match (self.lifecycle, self.activation) {
            (Lifecycle::Loading, _) => "loading".to_string(),
            (Lifecycle::Ready, Activation::Inactive) => "ready.inactive".to_string(),
            (Lifecycle::Ready, Activation::Selecting) => "ready.selecting".to_string(),
            (Lifecycle::Ready, Activation::Active) => format!(
                "ready.active({}, {:?}, {:?})",
                self.tool.name(),
                self.frame,
                self.draw
            ),
        }
    }
}
