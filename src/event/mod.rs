mod events;
mod queue;

pub use events::{OverlayEvent, PaletteItem};
pub use queue::EventQueue;
