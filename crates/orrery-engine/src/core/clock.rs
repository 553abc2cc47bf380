use crate::api::error::{OrreryError, OrreryResult};

/// Play/pause flag and speed multiplier gating the orbit integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    playing: bool,
    speed: f64,
    /// Total simulated time advanced, in scaled units.
    elapsed: f64,
}

impl SimulationClock {
    /// `speed` is trusted here; configuration validates it beforehand.
    pub fn new(speed: f64, playing: bool) -> Self {
        Self {
            playing,
            speed,
            elapsed: 0.0,
        }
    }

    /// Flip play/pause. Returns the new state.
    pub fn toggle_playing(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Replace the speed multiplier. Rejects non-finite and non-positive
    /// values and keeps the previous one.
    pub fn set_speed(&mut self, multiplier: f64) -> OrreryResult<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(OrreryError::InvalidSpeed(multiplier));
        }
        self.speed = multiplier;
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Account for `dt` unscaled units. Returns the scaled delta if the
    /// clock is playing, `None` if paused.
    pub fn step(&mut self, dt: f64) -> Option<f64> {
        if !self.playing {
            return None;
        }
        let scaled = dt * self.speed;
        self.elapsed += scaled;
        Some(scaled)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0, true)
    }
}

/// Fixed timestep accumulator.
/// Turns variable frame deltas (seconds) into a whole number of simulation
/// steps, so orbits advance at the same rate on any refresh rate.
#[derive(Debug, Clone)]
pub struct StepAccumulator {
    /// Seconds per step.
    step: f64,
    /// Most steps a single frame may produce.
    max_steps: u32,
    accumulator: f64,
}

impl StepAccumulator {
    pub fn new(step: f64, max_steps: u32) -> Self {
        Self {
            step,
            max_steps,
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns the number of steps to run.
    /// Time beyond `max_steps` is dropped so a stalled tab doesn't replay
    /// minutes of orbit in one frame.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator = (self.accumulator + frame_dt).min(self.step * self.max_steps as f64);
        // Epsilon absorbs rounding in the 1/60 step so exact multiples
        // don't come out one short.
        let steps = ((self.accumulator / self.step) + 1e-9).floor() as u32;
        self.accumulator = (self.accumulator - steps as f64 * self.step).max(0.0);
        steps
    }

    /// Fraction of a step carried into the next frame (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}
