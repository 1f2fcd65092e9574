use std::time::Instant;

/// Measures wall time between frames, capped so a stalled window (minimized,
/// suspended, stuck in a debugger) does not advance the fade by seconds at once.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_step: f32,
}

impl FrameClock {
    pub fn new(max_step: f32) -> Self {
        Self { last: None, max_step }
    }

    /// Seconds since the previous call; zero on the first call.
    pub fn step(&mut self) -> f32 {
        self.step_at(Instant::now())
    }

    pub fn step_at(&mut self, now: Instant) -> f32 {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        elapsed.min(self.max_step)
    }

    /// Forget the previous frame, so the next step starts from zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
