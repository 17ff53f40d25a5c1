//! Turnstile producer: one station's ridership as a stream of entry events.

use crate::client::BrokerClient;
use crate::error::ConfigurationError;
use crate::event_source::EventSource;
use crate::producer::{TopicProducer, TopicProducerBuilder};
use crate::schema::SchemaPair;
use crate::station::Station;
use crate::topic::normalize_station_name;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Key of a turnstile entry message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnstileKey {
    /// Wall-clock milliseconds at which the entry was emitted.
    pub timestamp: i64,
}

/// Value of a turnstile entry message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnstileValue {
    pub station_name: String,
    pub station_id: i32,
    pub line: String,
}

impl From<&Station> for TurnstileValue {
    fn from(station: &Station) -> Self {
        Self {
            station_name: station.name.clone(),
            station_id: station.station_id,
            line: station.line.clone(),
        }
    }
}

/// Emits one message per rider entering a station.
pub struct TurnstileProducer {
    producer: TopicProducer,
    station: Station,
    source: Box<dyn EventSource + Send>,
}

impl TurnstileProducer {
    /// Build a producer on the station's normalized topic (1 partition, 1 replica).
    pub fn new(
        station: Station,
        schemas: &SchemaPair,
        client: Arc<dyn BrokerClient>,
        source: Box<dyn EventSource + Send>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_builder(station, schemas, client, source, |builder| builder)
    }

    /// Like [`TurnstileProducer::new`], with a hook to adjust the topic
    /// producer before it is built (e.g. to swap the clock).
    pub fn with_builder<F>(
        station: Station,
        schemas: &SchemaPair,
        client: Arc<dyn BrokerClient>,
        source: Box<dyn EventSource + Send>,
        configure: F,
    ) -> Result<Self, ConfigurationError>
    where
        F: FnOnce(TopicProducerBuilder) -> TopicProducerBuilder,
    {
        let builder = TopicProducer::builder(normalize_station_name(&station.name))
            .key_schema(schemas.key.clone())
            .value_schema(schemas.value.clone())
            .partitions(1)
            .replicas(1);
        let producer = configure(builder).build(client)?;

        Ok(Self {
            producer,
            station,
            source,
        })
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn topic_name(&self) -> &str {
        self.producer.topic().name()
    }

    /// Publish one message per rider that entered during this tick.
    ///
    /// Publish failures are logged and skipped; the remaining entries are
    /// still attempted and nothing is returned to the caller.
    pub fn emit(&mut self, timestamp: DateTime<Utc>, time_step: Duration) {
        let entries = self.source.entries(timestamp, time_step);
        if entries == 0 {
            return;
        }

        let value = TurnstileValue::from(&self.station);
        let mut failed = 0u32;
        for index in 0..entries {
            let key = TurnstileKey {
                timestamp: self.producer.current_time_millis(),
            };
            if let Err(e) = self.producer.publish(&key, &value) {
                failed += 1;
                error!(
                    "Failed to publish entry {}/{} to '{}' (key timestamp {}): {e}",
                    index + 1,
                    entries,
                    self.topic_name(),
                    key.timestamp
                );
            }
        }

        debug!(
            "Station '{}' at {timestamp}: {} entries, {} failed",
            self.station.name, entries, failed
        );
    }
}
