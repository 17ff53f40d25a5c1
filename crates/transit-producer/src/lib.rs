//! Schema-validated Kafka producers for the transit ridership simulation.
//!
//! ## Features
//!
//! - **Topic producer**: [`TopicProducer`] validates key and value against an
//!   Avro [`SchemaPair`] and hands the encoded record to a [`BrokerClient`]
//! - **Turnstile producer**: [`TurnstileProducer`] publishes one message per
//!   rider counted by its [`EventSource`] on every simulation tick
//! - **Kafka**: [`KafkaBroker`] implements [`BrokerClient`] with rdkafka
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use transit_producer::{KafkaBroker, SchemaPair, Station, TurnstileProducer};
//! use transit_producer::testing::FixedCount;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schemas = SchemaPair::turnstile()?;
//! let client = Arc::new(KafkaBroker::new("localhost:9092")?);
//!
//! let station = Station {
//!     name: "Clark/Lake".to_string(),
//!     station_id: 1,
//!     line: "Green".to_string(),
//! };
//! let mut turnstile =
//!     TurnstileProducer::new(station, &schemas, client, Box::new(FixedCount(3)))?;
//!
//! turnstile.emit(chrono::Utc::now(), std::time::Duration::from_secs(60));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clock;
pub mod error;
pub mod event_source;
pub mod kafka;
pub mod producer;
pub mod schema;
pub mod station;
pub mod testing;
pub mod topic;
pub mod turnstile;

pub use client::{BrokerClient, OutboundRecord};
pub use clock::{Clock, SystemClock};
pub use error::{ConfigurationError, PublishError, RecordPart, SchemaError, TopicAdminError};
pub use event_source::EventSource;
pub use kafka::KafkaBroker;
pub use producer::{TopicProducer, TopicProducerBuilder};
pub use schema::{SchemaHandle, SchemaPair};
pub use station::Station;
pub use topic::{normalize_station_name, TopicSpec};
pub use turnstile::{TurnstileKey, TurnstileProducer, TurnstileValue};
