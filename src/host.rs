use egui::{Context, ViewportCommand};
use log::info;

/// Window-level capabilities the overlay needs from its host.
pub trait HostWindow {
    /// Cover the screen and start receiving pointer input.
    fn activate(&mut self);

    /// Let pointer input fall through to whatever is beneath the overlay.
    fn deactivate(&mut self);
}

/// Host backed by the root egui viewport.
#[derive(Debug, Clone)]
pub struct ViewportHost {
    ctx: Context,
}

impl ViewportHost {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

impl HostWindow for ViewportHost {
    fn activate(&mut self) {
        info!("overlay accepts pointer input");
        self.ctx.send_viewport_cmd(ViewportCommand::MousePassthrough(false));
        self.ctx.send_viewport_cmd(ViewportCommand::Maximized(true));
        self.ctx.send_viewport_cmd(ViewportCommand::Focus);
    }

    fn deactivate(&mut self) {
        info!("overlay passes pointer input through");
        self.ctx.send_viewport_cmd(ViewportCommand::MousePassthrough(true));
    }
}
