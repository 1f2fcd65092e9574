mod action;
mod machine;
mod regions;

pub use action::Action;
pub use machine::{Guards, Transition, transition};
pub use regions::{Activation, DrawSession, Frame, Lifecycle, MarksPhase, OverlayState};
