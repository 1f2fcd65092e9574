use egui::{Color32, Pos2};

use crate::engine::ClearScope;
use crate::mark::ToolKind;

/// Side effect requested by a state transition, run by the overlay in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Take ownership of the surfaces carried by `SurfacesReady`
    BindSurfaces,
    ReleaseSurfaces,
    /// Clear both surfaces
    ClearSurfaces,
    /// Re-measure and resize both surfaces
    FitSurfaces,

    /// Let the overlay receive pointer input
    ActivateHost,
    /// Pass pointer input through to what is beneath
    DeactivateHost,

    BeginMark { point: Pos2, tool: ToolKind },
    AppendPoint(Pos2),
    CompleteMark,
    DiscardCurrent,
    ClearRedo,
    Undo,
    Redo,
    ClearMarks(ClearScope),

    /// Redraw the accumulated surface
    RenderCommitted,
    /// Redraw the ephemeral surface
    RenderCurrent,

    SetColor(Color32),
    SetSize(f32),
    SetFading(bool),
}
