//! Wall-clock source for session start times and bill snapshots.
//!
//! The table actor and the bill ticker read time through [`Clock`] so tests can
//! drive sessions with a [`ManualClock`] instead of sleeping.

use chrono::{DateTime, Duration, Utc};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            instant: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().unwrap_or_else(|p| p.into_inner()) = instant;
    }

    /// Moves the clock by `delta`; negative deltas simulate clock skew.
    pub fn advance(&self, delta: Duration) {
        let mut instant = self.instant.lock().unwrap_or_else(|p| p.into_inner());
        *instant += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().unwrap_or_else(|p| p.into_inner())
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_moves_only_on_request() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let shared = clock.clone();

        assert_eq!(shared.now(), start);
        clock.advance(Duration::minutes(5));
        assert_eq!(shared.now(), start + Duration::minutes(5));
        clock.set(start);
        assert_eq!(shared.now(), start);
    }
}
