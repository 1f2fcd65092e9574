#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod fade;
pub mod host;
pub mod input;
pub mod mark;
pub mod overlay;
pub mod panels;
pub mod smoothing;
pub mod state;
pub mod surface;
pub mod util;

pub use app::OverlayApp;
pub use config::OverlayConfig;
pub use engine::{Brush, ClearScope, DrawingEngine};
pub use error::{ConfigError, EngineError, OverlayError};
pub use event::{OverlayEvent, PaletteItem};
pub use fade::FadeScheduler;
pub use host::{HostWindow, ViewportHost};
pub use mark::{Mark, MarkId, ToolKind};
pub use overlay::Overlay;
pub use state::OverlayState;
pub use surface::{CompositeMode, RenderSurface, SurfacePair, SurfaceSize};
