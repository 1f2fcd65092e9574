#![warn(clippy::all, rust_2018_idioms)]

use fade_overlay::config::{CONFIG_ENV, OverlayConfig};
use fade_overlay::OverlayApp;

fn load_config() -> OverlayConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return OverlayConfig::default();
    };
    match OverlayConfig::load(&path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.to_string_lossy());
            config
        }
        Err(err) => {
            log::warn!("ignoring config {}: {err}", path.to_string_lossy());
            OverlayConfig::default()
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Fade Overlay")
            .with_transparent(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_maximized(true)
            .with_mouse_passthrough(true),
        ..Default::default()
    };

    eframe::run_native(
        "Fade Overlay",
        native_options,
        Box::new(move |cc| Ok(Box::new(OverlayApp::new(cc, config)?))),
    )
}
