/// Fixed timestep accumulator.
/// Particle speeds are authored in pixels per reference frame; this turns
/// variable wall-clock deltas into a whole number of reference steps.
pub struct FixedTimestep {
    /// The fixed delta time per tick, in milliseconds.
    dt_ms: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
}

impl FixedTimestep {
    /// Maximum number of steps handed out per frame.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt_ms: f64) -> Self {
        Self {
            dt_ms,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt_ms: f64) -> u32 {
        self.accumulator += frame_dt_ms.max(0.0);
        // Cap to prevent spiral of death after a backgrounded tab resumes
        self.accumulator = self.accumulator.min(self.dt_ms * Self::MAX_STEPS as f64);
        let steps = (self.accumulator / self.dt_ms) as u32;
        self.accumulator -= steps as f64 * self.dt_ms;
        steps
    }
}

/// Wall clock fed by the host's animation-frame timestamps.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    start_ms: Option<f64>,
    now_ms: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new frame timestamp. Returns the delta since the previous frame.
    /// The first call anchors the clock and yields zero.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let delta = match self.start_ms {
            None => {
                self.start_ms = Some(now_ms);
                0.0
            }
            Some(_) => (now_ms - self.now_ms).max(0.0),
        };
        self.now_ms = now_ms;
        delta
    }

    /// True once the first frame has been recorded.
    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    /// Timestamp of the most recent frame.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Milliseconds since the first recorded frame.
    pub fn elapsed_ms(&self) -> f64 {
        match self.start_ms {
            Some(start) => (self.now_ms - start).max(0.0),
            None => 0.0,
        }
    }
}
