//! The physical process behind a producer.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counts the discrete events (riders) that happened during one tick.
///
/// Implementations may keep internal state such as an RNG, but must return 0
/// whenever `time_step` is zero.
pub trait EventSource {
    fn entries(&mut self, timestamp: DateTime<Utc>, time_step: Duration) -> u32;
}

