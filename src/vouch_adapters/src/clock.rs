use chrono::{DateTime, Utc};
use vouch_core::Clock;

/// The wall clock. Tests inject fixed clocks instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
