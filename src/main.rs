//! Command-line interface for transit-sim
//!
//! # Usage Examples
//!
//! ```bash
//! # Run 60 ticks against a local broker
//! transit-sim run --config simulation.toml --num-ticks 60
//!
//! # Use custom Avro schemas
//! transit-sim run --config simulation.toml \
//!   --key-schema schemas/turnstile_key.json \
//!   --value-schema schemas/turnstile_value.json
//!
//! # Print station topics
//! transit-sim topics --config simulation.toml
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use transit_producer::{normalize_station_name, BrokerClient, KafkaBroker};
use transit_sim::config::duration::parse_duration;
use transit_sim::{load_schemas, DryRunBroker, Simulation, SimulationConfig};

#[derive(Parser)]
#[command(name = "transit-sim")]
#[command(about = "Simulates transit turnstile ridership and publishes it to Kafka")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation
    Run(RunArgs),

    /// Print the topic each configured station publishes to
    Topics {
        /// Path to the simulation TOML file
        #[arg(long, short = 'c')]
        config: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Path to the simulation TOML file
    #[arg(long, short = 'c')]
    config: PathBuf,

    /// Kafka brokers (comma-separated, e.g., "localhost:9092")
    #[arg(long, env = "KAFKA_BROKERS", default_value = "localhost:9092")]
    kafka_brokers: String,

    /// Avro key schema file (defaults to the bundled turnstile key schema)
    #[arg(long)]
    key_schema: Option<PathBuf>,

    /// Avro value schema file (defaults to the bundled turnstile value schema)
    #[arg(long)]
    value_schema: Option<PathBuf>,

    /// Override the number of ticks from the config (0 = until Ctrl+C)
    #[arg(long)]
    num_ticks: Option<u64>,

    /// How long to wait for outstanding deliveries on exit
    #[arg(long, default_value = "10s", value_parser = parse_duration)]
    flush_timeout: Duration,

    /// Log records instead of sending them to Kafka
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_simulation(args).await,
        Commands::Topics { config } => {
            let config = SimulationConfig::from_file(&config)
                .with_context(|| format!("Failed to load simulation config from {config:?}"))?;
            for station in &config.stations {
                println!(
                    "{}\t{}",
                    normalize_station_name(&station.station.name),
                    station.station.name
                );
            }
            Ok(())
        }
    }
}

async fn run_simulation(args: RunArgs) -> anyhow::Result<()> {
    let config = SimulationConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load simulation config from {:?}", args.config))?;
    let schemas = load_schemas(args.key_schema.as_deref(), args.value_schema.as_deref())
        .context("Failed to load turnstile schemas")?;
    let num_ticks = args.num_ticks.unwrap_or(config.num_ticks);

    let kafka = if args.dry_run {
        None
    } else {
        Some(Arc::new(
            KafkaBroker::new(&args.kafka_brokers)
                .with_context(|| format!("Failed to connect to Kafka at {}", args.kafka_brokers))?,
        ))
    };
    let client: Arc<dyn BrokerClient> = match &kafka {
        Some(kafka) => kafka.clone() as Arc<dyn BrokerClient>,
        None => Arc::new(DryRunBroker::new(schemas.clone())),
    };

    let mut simulation =
        Simulation::new(&config, &schemas, client).context("Failed to set up simulation")?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };
    simulation
        .run(num_ticks, config.tick_interval(), shutdown)
        .await;

    if let Some(kafka) = kafka {
        kafka
            .flush(args.flush_timeout)
            .context("Failed to flush outstanding Kafka deliveries")?;
    }

    Ok(())
}
