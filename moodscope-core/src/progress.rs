use std::time::Duration;

/// Period of the fake progress timer.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Fake progress never goes past this until the backend has answered.
pub const FAKE_PROGRESS_CEILING: f64 = 95.0;

/// How long a completed progress bar stays on screen.
pub const HIDE_DELAY: Duration = Duration::from_secs(1);

/// Timer-driven progress estimate for a run of `estimated_seconds`.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeProgress {
    increment: f64,
    percent: f64,
}

impl FakeProgress {
    pub fn new(estimated_seconds: u64) -> Self {
        let ticks = estimated_seconds as f64 / TICK_INTERVAL.as_secs_f64();
        let increment = if ticks > 0.0 {
            FAKE_PROGRESS_CEILING / ticks
        } else {
            FAKE_PROGRESS_CEILING
        };
        Self {
            increment,
            percent: 0.0,
        }
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// One timer tick; returns the new percentage.
    pub fn advance(&mut self) -> f64 {
        self.percent = (self.percent + self.increment).min(FAKE_PROGRESS_CEILING);
        self.percent
    }
}
