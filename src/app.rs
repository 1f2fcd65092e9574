use egui::Pos2;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::OverlayConfig;
use crate::error::ConfigError;
use crate::event::{EventQueue, OverlayEvent};
use crate::host::ViewportHost;
use crate::input::InputHandler;
use crate::overlay::Overlay;
use crate::panels::{self, PaletteView};
use crate::surface::{RasterSurface, SurfacePair, SurfaceSize, SurfaceTextures, Viewport};
use crate::util::time::FrameClock;

const PALETTE_KEY: &str = "fade_overlay_palette";

/// What survives a restart
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct PaletteMemory {
    pos: Pos2,
}

impl Default for PaletteMemory {
    fn default() -> Self {
        Self {
            pos: egui::pos2(24.0, 24.0),
        }
    }
}

pub struct OverlayApp {
    config: OverlayConfig,
    overlay: Overlay<RasterSurface, ViewportHost>,
    viewport: Viewport,
    queue: EventQueue<RasterSurface>,
    input: InputHandler,
    textures: SurfaceTextures,
    clock: FrameClock,
    palette: PaletteMemory,
    surfaces_sent: bool,
}

impl OverlayApp {
    /// Called once before the first frame. Fails on an unusable config.
    pub fn new(cc: &eframe::CreationContext<'_>, config: OverlayConfig) -> Result<Self, ConfigError> {
        let palette = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, PALETTE_KEY))
            .unwrap_or_default();
        let host = ViewportHost::new(cc.egui_ctx.clone());

        Ok(Self {
            overlay: Overlay::new(&config, host)?,
            clock: FrameClock::new(config.max_frame_time),
            config,
            viewport: Viewport::default(),
            queue: EventQueue::new(),
            input: InputHandler::new(),
            textures: SurfaceTextures::new(),
            palette,
            surfaces_sent: false,
        })
    }

    /// Window size in physical pixels
    fn measure(ctx: &egui::Context) -> SurfaceSize {
        let rect = ctx.screen_rect();
        let ppp = ctx.pixels_per_point();
        SurfaceSize::new(
            (rect.width() * ppp).round().max(0.0) as u32,
            (rect.height() * ppp).round().max(0.0) as u32,
        )
    }

    fn create_surfaces(&self) -> SurfacePair<RasterSurface> {
        let mut pair = SurfacePair::new(
            RasterSurface::new(self.viewport.clone()),
            RasterSurface::new(self.viewport.clone()),
        );
        pair.fit();
        pair
    }

    fn drain_queue(&mut self) {
        while let Some(event) = self.queue.pop() {
            let name = event.name();
            if let Err(err) = self.overlay.handle(event) {
                error!("failed to handle {name}: {err}");
            }
        }
    }

    fn show_palette(&mut self, ctx: &egui::Context) -> Vec<OverlayEvent<RasterSurface>> {
        let state = self.overlay.state();
        let engine = self.overlay.engine();
        let view = PaletteView {
            tool: state.tool,
            color: engine.brush().color,
            size: engine.brush().size,
            colors: &self.config.palette,
            sizes: &self.config.sizes,
            can_undo: engine.has_marks(),
            can_redo: engine.can_redo(),
            fading: self.overlay.is_fading(),
            active: state.is_active(),
        };
        let mut events = Vec::new();
        let rect = panels::tools_panel(ctx, &view, &mut self.palette.pos, &mut events);
        self.input.set_palette_rect(Some(rect));
        events
    }
}

impl eframe::App for OverlayApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PALETTE_KEY, &self.palette);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.viewport.set_scale(ctx.pixels_per_point());
        let resized = self.viewport.set(Self::measure(ctx));

        if !self.surfaces_sent {
            info!("binding surfaces at {:?}", self.viewport.get());
            let pair = self.create_surfaces();
            self.queue.push(OverlayEvent::SurfacesReady(pair));
            self.surfaces_sent = true;
        } else if resized {
            self.queue.push(OverlayEvent::Resized);
        }

        let palette_events = self.show_palette(ctx);
        let active = self.overlay.state().is_active();
        let input_events = self.input.process_input(ctx, active);
        self.queue.extend(palette_events);
        self.queue.extend(input_events);
        self.drain_queue();

        match self.overlay.tick(self.clock.step()) {
            Ok(outcome) if outcome.emptied => info!("all marks faded"),
            Ok(_) => {}
            Err(err) => warn!("fade tick skipped: {err}"),
        }

        match self.overlay.surfaces() {
            Some(surfaces) => self.textures.sync(surfaces, ctx),
            None => self.textures.release(),
        }
        panels::central_panel(ctx, &self.textures);

        let state = self.overlay.state();
        if self.overlay.scheduler().is_active() || state.is_drawing() {
            ctx.request_repaint();
        } else {
            self.clock.reset();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.queue.push(OverlayEvent::SurfacesTornDown);
        self.drain_queue();
        self.textures.release();
    }
}
