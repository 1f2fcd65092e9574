use egui::{Color32, Pos2};

use crate::surface::SurfacePair;

/// An entry of the tool palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaletteItem {
    Pencil,
    Eraser,
    Color(Color32),
    Size(f32),
}

impl PaletteItem {
    pub fn label(&self) -> String {
        match self {
            Self::Pencil => "Pencil".to_owned(),
            Self::Eraser => "Eraser".to_owned(),
            Self::Color(c) => format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b()),
            Self::Size(size) => format!("{size} px"),
        }
    }
}

/// Everything the overlay reacts to. `S` is the render surface type the
/// host hands over once its drawing surfaces exist.
#[derive(Debug)]
pub enum OverlayEvent<S> {
    /// The host created its surfaces; the overlay takes ownership of them
    SurfacesReady(SurfacePair<S>),
    /// The host is going away; surfaces are released
    SurfacesTornDown,

    Activate,
    Deactivate,
    EnteredToolPalette,
    LeftToolPalette,
    SelectedTool(PaletteItem),

    SelectedColor(Color32),
    SelectedSize(f32),
    SelectedEraser,
    SelectedPencil,

    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp,

    Undo,
    Redo,
    Resized,

    StartDrag,
    StopDrag,

    /// Drop all marks, keep tool activation as is
    ClearSoft,
    /// Drop all marks and go back to the tool palette
    ClearMedium,
    /// Drop all marks and let clicks through again
    ClearHard,

    /// Turn fading on or off at runtime
    SetFading(bool),
}

impl<S> OverlayEvent<S> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SurfacesReady(_) => "SurfacesReady",
            Self::SurfacesTornDown => "SurfacesTornDown",
            Self::Activate => "Activate",
            Self::Deactivate => "Deactivate",
            Self::EnteredToolPalette => "EnteredToolPalette",
            Self::LeftToolPalette => "LeftToolPalette",
            Self::SelectedTool(_) => "SelectedTool",
            Self::SelectedColor(_) => "SelectedColor",
            Self::SelectedSize(_) => "SelectedSize",
            Self::SelectedEraser => "SelectedEraser",
            Self::SelectedPencil => "SelectedPencil",
            Self::PointerDown(_) => "PointerDown",
            Self::PointerMove(_) => "PointerMove",
            Self::PointerUp => "PointerUp",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Resized => "Resized",
            Self::StartDrag => "StartDrag",
            Self::StopDrag => "StopDrag",
            Self::ClearSoft => "ClearSoft",
            Self::ClearMedium => "ClearMedium",
            Self::ClearHard => "ClearHard",
            Self::SetFading(_) => "SetFading",
        }
    }
}
