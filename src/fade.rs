use log::debug;

use crate::config::FadeConfig;
use crate::engine::DrawingEngine;
use crate::error::ConfigError;
use crate::surface::RenderSurface;

/// Result of a single fade tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Marks evicted because their strength reached zero
    pub removed: usize,
    /// The committed collection became empty and the scheduler went dormant
    pub emptied: bool,
}

/// Fixed-step process that ages committed marks.
///
/// Every tick takes `tick_interval / duration` off each mark's strength, evicts
/// marks at or below zero and redraws the accumulated surface. The scheduler
/// only runs while it is active; it switches itself off when the last mark is
/// gone and has to be re-armed by the owner once a new mark is committed.
#[derive(Debug, Clone)]
pub struct FadeScheduler {
    tick_interval: f32,
    duration: f32,
    active: bool,
    pending: f32,
}

impl FadeScheduler {
    /// Fails if the interval or duration is not positive, since neither
    /// decay nor the tick loop would make progress.
    pub fn new(config: &FadeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tick_interval: config.tick_interval,
            duration: config.duration,
            active: false,
            pending: 0.0,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Strength lost per tick
    pub fn step(&self) -> f32 {
        self.tick_interval / self.duration
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            debug!("fade scheduler {}", if active { "armed" } else { "dormant" });
        }
        self.active = active;
        if !active {
            self.pending = 0.0;
        }
    }

    /// Run one tick now, regardless of elapsed time.
    pub fn tick<S: RenderSurface + ?Sized>(
        &mut self,
        engine: &mut DrawingEngine,
        surface: &mut S,
    ) -> TickOutcome {
        if !self.active {
            return TickOutcome::default();
        }

        let removed = engine.decay(self.step());
        if removed > 0 {
            debug!("{removed} mark(s) faded out");
        }
        engine.render_committed(surface);

        let emptied = !engine.has_marks();
        if emptied {
            self.set_active(false);
        }
        TickOutcome { removed, emptied }
    }

    /// Account for `elapsed` seconds of wall time and run every whole tick
    /// that fits. Leftover time carries over to the next call.
    pub fn advance<S: RenderSurface + ?Sized>(
        &mut self,
        elapsed: f32,
        engine: &mut DrawingEngine,
        surface: &mut S,
    ) -> TickOutcome {
        let mut total = TickOutcome::default();
        if !self.active {
            return total;
        }

        self.pending += elapsed.max(0.0);
        while self.active && self.pending >= self.tick_interval {
            self.pending -= self.tick_interval;
            let outcome = self.tick(engine, surface);
            total.removed += outcome.removed;
            total.emptied |= outcome.emptied;
        }
        total
    }
}
