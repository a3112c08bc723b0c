//! Dramatic pauses between story beats.
//!
//! Game actions never sleep. The narrator asks [`Pacing`] to pause between
//! lines of text; a zero delay turns every pause into a no-op.

use std::thread;
use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    delay: Duration,
}

impl Pacing {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub const fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Builds a pacing from fractional seconds. Negative or non-finite input
    /// collapses to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self::new(Duration::from_secs_f64(secs))
        } else {
            Self::instant()
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_instant(&self) -> bool {
        self.delay.is_zero()
    }

    pub fn pause(&self) {
        self.pause_scaled(1);
    }

    pub fn pause_scaled(&self, factor: u32) {
        if self.is_instant() || factor == 0 {
            return;
        }
        thread::sleep(self.delay.saturating_mul(factor));
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
