//! Countdown clock for the round time limit

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    duration: f32,
    elapsed: f32,
    finished: bool,
}

impl CountdownTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            finished: false,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Whole seconds left, rounded down (what a HUD shows)
    pub fn whole_seconds_left(&self) -> u32 {
        self.remaining().floor() as u32
    }

    /// Elapsed fraction in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance; returns true on the tick the clock runs out, and only then
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.finished = true;
            return true;
        }
        false
    }

    pub fn restart(&mut self, duration: f32) {
        *self = Self::new(duration);
    }
}
