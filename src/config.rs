//! Simulation configuration loaded from TOML.
//!
//! ```toml
//! start = "2024-03-04T05:00:00Z"
//! time_step = "1m"
//! num_ticks = 60
//! speedup = 60.0
//! seed = 42
//!
//! [[stations]]
//! name = "Clark/Lake"
//! station_id = 40380
//! line = "Blue"
//! ridership = { weekday = 15000, saturday = 6000, sunday = 4500 }
//! ```

pub mod duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use transit_producer::{normalize_station_name, Station};
use turnstile_hardware::{CurveError, HourlyCurve, RidershipProfile};

/// Errors raised while loading or validating the simulation config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid duration: '{0}'")]
    InvalidDuration(String),

    #[error("Config must list at least one station")]
    NoStations,

    #[error("Time step must be greater than zero")]
    ZeroTimeStep,

    #[error("Speedup must be a positive number, got {0}")]
    InvalidSpeedup(f64),

    #[error("Stations '{first}' and '{second}' both map to topic '{topic}'")]
    DuplicateTopic {
        topic: String,
        first: String,
        second: String,
    },

    #[error("Invalid hourly curve: {0}")]
    Curve(#[from] CurveError),
}

fn default_speedup() -> f64 {
    1.0
}

/// Top-level simulation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Simulation time of the first tick. Defaults to now.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    /// Simulated time covered by one tick.
    #[serde(deserialize_with = "duration::deserialize")]
    pub time_step: Duration,

    /// Number of ticks to run; 0 runs until interrupted.
    #[serde(default)]
    pub num_ticks: u64,

    /// How much faster than real time the simulation runs.
    #[serde(default = "default_speedup")]
    pub speedup: f64,

    /// Random seed for deterministic ridership (same seed = same counts)
    #[serde(default)]
    pub seed: u64,

    /// Relative hourly weights; the built-in commuter curve when absent.
    #[serde(default)]
    pub curve: Option<[f64; 24]>,

    pub stations: Vec<StationConfig>,
}

/// One station and its ridership.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    #[serde(flatten)]
    pub station: Station,
    pub ridership: RidershipProfile,
}

impl SimulationConfig {
    /// Read and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stations.is_empty() {
            return Err(ConfigError::NoStations);
        }
        if self.time_step.is_zero() {
            return Err(ConfigError::ZeroTimeStep);
        }
        if !self.speedup.is_finite() || self.speedup <= 0.0 {
            return Err(ConfigError::InvalidSpeedup(self.speedup));
        }
        if Duration::try_from_secs_f64(self.time_step.as_secs_f64() / self.speedup).is_err() {
            return Err(ConfigError::InvalidSpeedup(self.speedup));
        }
        self.hourly_curve()?;

        let mut topics: HashMap<String, &str> = HashMap::new();
        for config in &self.stations {
            let topic = normalize_station_name(&config.station.name);
            if let Some(first) = topics.insert(topic.clone(), &config.station.name) {
                return Err(ConfigError::DuplicateTopic {
                    topic,
                    first: first.to_string(),
                    second: config.station.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The hourly ridership curve to use.
    pub fn hourly_curve(&self) -> Result<HourlyCurve, ConfigError> {
        match self.curve {
            Some(weights) => Ok(HourlyCurve::new(weights)?),
            None => Ok(HourlyCurve::default()),
        }
    }

    /// Wall-clock time between ticks. Saturates at `Duration::MAX`.
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_step.as_secs_f64() / self.speedup)
            .unwrap_or(Duration::MAX)
    }
}
