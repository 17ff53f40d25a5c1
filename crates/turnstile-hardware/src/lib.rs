//! Simulated turnstile hardware for transit-sim.
//!
//! [`TurnstileHardware`] is the [`transit_producer::EventSource`] behind each
//! turnstile producer. For every tick it estimates how many riders entered a
//! station:
//!
//! ```text
//! entries = floor(daily(day of week) * curve(hour) * step_hours * jitter)
//! ```
//!
//! where `jitter` is drawn uniformly from `[0.9, 1.1]` by a seeded RNG.

pub mod curve;
pub mod hardware;

pub use curve::{CurveError, HourlyCurve};
pub use hardware::{RidershipProfile, TurnstileHardware};
