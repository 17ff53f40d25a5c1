//! Transit ridership simulation
//!
//! Simulates riders entering stations and publishes one Avro-encoded message
//! per rider to a Kafka topic per station.
//!
//! # Crates
//!
//! - `transit_producer` - schema-validated topic and turnstile producers
//! - `turnstile_hardware` - the seeded ridership model behind each turnstile
//!
//! # CLI Usage
//!
//! ```bash
//! # Run a simulation against a local broker
//! transit-sim run --config simulation.toml --kafka-brokers localhost:9092
//!
//! # Log records instead of sending them
//! transit-sim run --config simulation.toml --dry-run
//!
//! # Show the topic each station publishes to
//! transit-sim topics --config simulation.toml
//! ```

pub mod config;
pub mod dry_run;
pub mod simulation;

use std::path::Path;
use transit_producer::{SchemaError, SchemaHandle, SchemaPair};

pub use config::{ConfigError, SimulationConfig, StationConfig};
pub use dry_run::DryRunBroker;
pub use simulation::{Simulation, SimulationError};

/// Load the turnstile schemas, replacing the bundled ones with any paths given.
pub fn load_schemas(
    key_path: Option<&Path>,
    value_path: Option<&Path>,
) -> Result<SchemaPair, SchemaError> {
    let bundled = SchemaPair::turnstile()?;
    Ok(SchemaPair {
        key: match key_path {
            Some(path) => SchemaHandle::from_file(path)?,
            None => bundled.key,
        },
        value: match value_path {
            Some(path) => SchemaHandle::from_file(path)?,
            None => bundled.value,
        },
    })
}
