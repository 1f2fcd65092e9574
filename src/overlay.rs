use log::{debug, info};

use crate::config::OverlayConfig;
use crate::engine::DrawingEngine;
use crate::error::{ConfigError, OverlayError};
use crate::event::OverlayEvent;
use crate::fade::{FadeScheduler, TickOutcome};
use crate::host::HostWindow;
use crate::state::{self, Action, Guards, MarksPhase, OverlayState};
use crate::surface::{RenderSurface, SurfacePair};

/// Everything one overlay window owns: interaction state, marks, the fade
/// scheduler, the two drawing surfaces (once the host provides them) and the
/// host window itself.
///
/// All mutation goes through [`Overlay::handle`] and [`Overlay::tick`], which
/// the host calls one at a time in arrival order.
pub struct Overlay<S, H> {
    state: OverlayState,
    engine: DrawingEngine,
    scheduler: FadeScheduler,
    fading: bool,
    surfaces: Option<SurfacePair<S>>,
    host: H,
}

impl<S, H> std::fmt::Debug for Overlay<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("state", &self.state)
            .field("engine", &self.engine)
            .field("scheduler", &self.scheduler)
            .field("fading", &self.fading)
            .field("surfaces_bound", &self.surfaces.is_some())
            .finish()
    }
}

impl<S: RenderSurface, H: HostWindow> Overlay<S, H> {
    pub fn new(config: &OverlayConfig, host: H) -> Result<Self, ConfigError> {
        let engine = DrawingEngine::new(config.brush(), config.fade.delay);
        Self::with_engine(engine, config, host)
    }

    /// Build around an existing engine, e.g. one with a custom smoother.
    /// The config is validated first.
    pub fn with_engine(engine: DrawingEngine, config: &OverlayConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: OverlayState::default(),
            engine,
            scheduler: FadeScheduler::new(&config.fade)?,
            fading: config.fade.enabled,
            surfaces: None,
            host,
        })
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &FadeScheduler {
        &self.scheduler
    }

    pub fn surfaces(&self) -> Option<&SurfacePair<S>> {
        self.surfaces.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    /// Feed one event through the state machine and run the resulting
    /// actions. Returns whether the event was legal in the current state.
    pub fn handle(&mut self, event: OverlayEvent<S>) -> Result<bool, OverlayError> {
        let guards = Guards {
            has_marks: self.engine.has_marks(),
            can_redo: self.engine.can_redo(),
        };
        let transition = state::transition(&self.state, &event, guards);
        if !transition.handled {
            return Ok(false);
        }

        let previous = self.state;
        self.state = transition.state;
        if previous.lifecycle != self.state.lifecycle || previous.activation != self.state.activation {
            info!("{} -> {}", previous.describe(), self.state.describe());
        }

        let mut incoming = match event {
            OverlayEvent::SurfacesReady(pair) => Some(pair),
            _ => None,
        };
        let result = transition
            .actions
            .into_iter()
            .try_for_each(|action| self.run(action, &mut incoming));
        self.sync_marks();
        result.map(|()| true)
    }

    /// Advance the fade by `elapsed` seconds of wall time.
    pub fn tick(&mut self, elapsed: f32) -> Result<TickOutcome, OverlayError> {
        if !self.scheduler.is_active() {
            return Ok(TickOutcome::default());
        }
        let surfaces = self.surfaces.as_mut().ok_or(OverlayError::SurfacesUnbound)?;
        let outcome = self
            .scheduler
            .advance(elapsed, &mut self.engine, &mut surfaces.accumulated);
        self.sync_marks();
        Ok(outcome)
    }

    fn surfaces_mut(&mut self) -> Result<&mut SurfacePair<S>, OverlayError> {
        self.surfaces.as_mut().ok_or(OverlayError::SurfacesUnbound)
    }

    fn run(&mut self, action: Action, incoming: &mut Option<SurfacePair<S>>) -> Result<(), OverlayError> {
        match action {
            Action::BindSurfaces => {
                if let Some(pair) = incoming.take() {
                    self.surfaces = Some(pair);
                }
            }
            Action::ReleaseSurfaces => self.surfaces = None,
            Action::ClearSurfaces => self.surfaces_mut()?.clear(),
            Action::FitSurfaces => self.surfaces_mut()?.fit(),

            Action::ActivateHost => self.host.activate(),
            Action::DeactivateHost => self.host.deactivate(),

            Action::BeginMark { point, tool } => {
                self.engine.begin_mark(point, tool)?;
            }
            Action::AppendPoint(point) => self.engine.append_point(point)?,
            Action::CompleteMark => {
                self.engine.complete_mark()?;
            }
            Action::DiscardCurrent => {
                self.engine.discard_current();
            }
            Action::ClearRedo => self.engine.clear_redo(),
            Action::Undo => {
                self.engine.undo()?;
            }
            Action::Redo => {
                self.engine.redo()?;
            }
            Action::ClearMarks(scope) => self.engine.clear(scope),

            Action::RenderCommitted => {
                let surfaces = self.surfaces.as_mut().ok_or(OverlayError::SurfacesUnbound)?;
                self.engine.render_committed(&mut surfaces.accumulated);
            }
            Action::RenderCurrent => {
                let surfaces = self.surfaces.as_mut().ok_or(OverlayError::SurfacesUnbound)?;
                self.engine.render_current(&mut surfaces.ephemeral);
            }

            Action::SetColor(color) => self.engine.set_color(color),
            Action::SetSize(size) => self.engine.set_size(size),
            Action::SetFading(enabled) => {
                debug!("fading {}", if enabled { "enabled" } else { "disabled" });
                self.fading = enabled;
            }
        }
        Ok(())
    }

    /// Bring the marks region and the scheduler in line with the engine.
    fn sync_marks(&mut self) {
        let phase = MarksPhase::observe(self.engine.has_marks(), self.fading);
        if phase != self.state.marks {
            debug!("marks {:?} -> {:?}", self.state.marks, phase);
            self.state.marks = phase;
        }
        self.scheduler.set_active(phase == MarksPhase::Fading);
    }
}
