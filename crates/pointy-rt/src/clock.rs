//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Runtime helpers driving the simulators."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of wall-clock timestamps stamped onto simulated records.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type SharedClock = Arc<dyn Clock>;

/// Real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let mut guard = self.now.lock();
        *guard += by;
        *guard
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Wall time anchored to the tokio clock.
///
/// Elapsed time is measured with [`tokio::time::Instant`], so under a paused
/// runtime the timestamps advance exactly as far as the virtual clock does.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeClock {
    origin_wall: DateTime<Utc>,
    origin: tokio::time::Instant,
}

impl RuntimeClock {
    pub fn starting_at(origin_wall: DateTime<Utc>) -> Self {
        Self {
            origin_wall,
            origin: tokio::time::Instant::now(),
        }
    }

    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }
}

impl Default for RuntimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RuntimeClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed =
            Duration::from_std(self.origin.elapsed()).unwrap_or_else(|_| Duration::zero());
        self.origin_wall + elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_moves_on_demand() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        let later = clock.advance(Duration::seconds(3));
        assert_eq!(later, start + Duration::seconds(3));
        assert_eq!(clock.clone().now(), later);
    }

    #[tokio::test(start_paused = true)]
    async fn runtime_clock_follows_paused_time() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let clock = RuntimeClock::starting_at(start);
        tokio::time::advance(std::time::Duration::from_secs(15)).await;
        assert_eq!(clock.now(), start + Duration::seconds(15));
    }
}
