//! Station descriptors.

use serde::{Deserialize, Serialize};

/// A station whose turnstile emits ridership events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub station_id: i32,
    /// Line color, published verbatim (e.g. "Green").
    pub line: String,
}
