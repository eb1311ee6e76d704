// tests/support/mocks/util.rs
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

use folio_core::application::ports::time::Clock;

#[derive(Clone)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        crate::support::fixed_now()
    }
}

/// Advances by one second on every call; the first call returns
/// `fixed_now() + 1s`, so posts seeded at `fixed_now()` are always older.
#[derive(Default)]
pub struct SteppingClock {
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        crate::support::fixed_now() + Duration::seconds(tick)
    }
}
