//! Exact accumulation of per-gene wall and user CPU time.
//!
//! Durations are integer nanoseconds, so summation is associative and
//! order-independent; no floating-point drift across large batches.

use std::time::Duration;

/// Wall and user CPU time measured around one external invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedTimes {
    pub wall: Duration,
    pub user: Duration,
}

impl ElapsedTimes {
    pub fn merge(&mut self, other: &ElapsedTimes) {
        self.wall += other.wall;
        self.user += other.user;
    }
}

/// Running totals across a whole batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingTotals {
    wall: Duration,
    user: Duration,
}

impl TimingTotals {
    pub fn add(&mut self, times: &ElapsedTimes) {
        self.wall += times.wall;
        self.user += times.user;
    }

    pub fn wall(&self) -> Duration {
        self.wall
    }

    pub fn user(&self) -> Duration {
        self.user
    }
}

/// Render a duration as fractional seconds with millisecond precision
pub fn fmt_seconds(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}
