//! Simulation clock driving every station's turnstile once per tick.

use crate::config::{ConfigError, SimulationConfig};
use chrono::{DateTime, TimeDelta, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use transit_producer::{BrokerClient, ConfigurationError, SchemaPair, TurnstileProducer};
use turnstile_hardware::TurnstileHardware;

/// Smallest wall-clock pause between ticks.
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Errors raised while setting up a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Producer(#[from] ConfigurationError),

    #[error("Time step {0:?} is out of range")]
    TimeStepOutOfRange(Duration),
}

/// All turnstiles of a simulation plus the simulated clock.
pub struct Simulation {
    turnstiles: Vec<TurnstileProducer>,
    timestamp: DateTime<Utc>,
    time_step: Duration,
    step: TimeDelta,
    ticks: u64,
}

impl Simulation {
    /// Build one turnstile producer per configured station.
    pub fn new(
        config: &SimulationConfig,
        schemas: &SchemaPair,
        client: Arc<dyn BrokerClient>,
    ) -> Result<Self, SimulationError> {
        let step = TimeDelta::from_std(config.time_step)
            .map_err(|_| SimulationError::TimeStepOutOfRange(config.time_step))?;
        let curve = config.hourly_curve()?;

        let turnstiles = config
            .stations
            .iter()
            .map(|station_config| {
                let hardware = TurnstileHardware::new(
                    &station_config.station,
                    station_config.ridership,
                    curve.clone(),
                    config.seed,
                );
                TurnstileProducer::new(
                    station_config.station.clone(),
                    schemas,
                    client.clone(),
                    Box::new(hardware),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            turnstiles,
            timestamp: config.start.unwrap_or_else(Utc::now),
            time_step: config.time_step,
            step,
            ticks: 0,
        })
    }

    /// Simulation time of the next tick.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn turnstiles(&self) -> &[TurnstileProducer] {
        &self.turnstiles
    }

    /// Emit for every station, then advance the simulated clock by one step.
    pub fn tick(&mut self) {
        for turnstile in &mut self.turnstiles {
            turnstile.emit(self.timestamp, self.time_step);
        }
        self.timestamp += self.step;
        self.ticks += 1;
    }

    /// Tick every `interval` of wall time until `num_ticks` ticks have run
    /// (0 = no limit) or `shutdown` completes. Returns the ticks run.
    pub async fn run<F>(&mut self, num_ticks: u64, interval: Duration, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval.max(MIN_TICK_INTERVAL));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let started = self.ticks;
        info!(
            "Starting simulation at {} with {} stations",
            self.timestamp,
            self.turnstiles.len()
        );

        while num_ticks == 0 || self.ticks - started < num_ticks {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Received shutdown signal, stopping simulation");
                    break;
                }
                _ = ticker.tick() => self.tick(),
            }
        }

        let ran = self.ticks - started;
        info!("Simulation finished after {ran} ticks at {}", self.timestamp);
        ran
    }
}
