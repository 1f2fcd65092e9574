use thiserror::Error;

/// Contract violations of the drawing engine. The interaction state machine
/// only issues operations whose preconditions hold, so these indicate a bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("a mark is already in progress")]
    MarkInProgress,

    #[error("no mark is in progress")]
    NoCurrentMark,

    #[error("there is no committed mark to undo")]
    NothingToUndo,

    #[error("there is no undone mark to redo")]
    NothingToRedo,
}

/// Errors that can occur while loading the overlay configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by the overlay while handling an event or a fade tick
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("render surfaces are not bound")]
    SurfacesUnbound,

    #[error(transparent)]
    Engine(#[from] EngineError),
}
