//! Turnstile hardware: samples rider entries for a station.

use crate::curve::HourlyCurve;
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use transit_producer::{EventSource, Station};

/// Lower and upper bound of the random factor applied to expected entries.
const JITTER: (f64, f64) = (0.9, 1.1);

/// Average daily entries at a station, by kind of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RidershipProfile {
    pub weekday: u32,
    pub saturday: u32,
    pub sunday: u32,
}

impl RidershipProfile {
    /// Average entries for the day `timestamp` falls on.
    pub fn daily(&self, timestamp: DateTime<Utc>) -> u32 {
        match timestamp.weekday() {
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
            _ => self.weekday,
        }
    }
}

/// Simulated turnstile for one station.
///
/// Uses a seeded random number generator so that the same seed, station and
/// sequence of ticks always produce the same counts.
pub struct TurnstileHardware {
    profile: RidershipProfile,
    curve: HourlyCurve,
    rng: StdRng,
}

impl TurnstileHardware {
    /// Create the hardware for `station`, seeding its RNG from `seed` and the station id.
    pub fn new(station: &Station, profile: RidershipProfile, curve: HourlyCurve, seed: u64) -> Self {
        Self {
            profile,
            curve,
            rng: StdRng::seed_from_u64(station_seed(seed, station.station_id)),
        }
    }

    /// Entries expected on average over `time_step` starting at `timestamp`.
    pub fn expected_entries(&self, timestamp: DateTime<Utc>, time_step: Duration) -> f64 {
        let daily = self.profile.daily(timestamp) as f64;
        let hours = time_step.as_secs_f64() / 3600.0;
        daily * self.curve.share(timestamp.hour()) * hours
    }
}

impl EventSource for TurnstileHardware {
    fn entries(&mut self, timestamp: DateTime<Utc>, time_step: Duration) -> u32 {
        if time_step.is_zero() {
            return 0;
        }
        let expected = self.expected_entries(timestamp, time_step);
        let jitter = self.rng.gen_range(JITTER.0..=JITTER.1);
        // Float to int casts saturate
        (expected * jitter).floor() as u32
    }
}

/// Combine the simulation seed with a station id.
fn station_seed(seed: u64, station_id: i32) -> u64 {
    seed.wrapping_add((station_id as u64).wrapping_mul(0x9E3779B97F4A7C15))
}
