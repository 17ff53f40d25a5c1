//! Simulation driver tests using in-memory brokers.

use chrono::{TimeZone, Utc};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use transit_producer::testing::RecordingBroker;
use transit_sim::{load_schemas, DryRunBroker, Simulation, SimulationConfig};

const CONFIG: &str = r#"
start = "2024-03-04T08:00:00Z"
time_step = "5m"
num_ticks = 3
speedup = 1000000.0
seed = 42

[[stations]]
name = "Clark/Lake"
station_id = 40380
line = "Blue"
ridership = { weekday = 20000, saturday = 8000, sunday = 6000 }

[[stations]]
name = "Washington/Wells"
station_id = 40730
line = "Brown"
ridership = { weekday = 9000, saturday = 2000, sunday = 1500 }
"#;

fn config() -> SimulationConfig {
    SimulationConfig::from_toml(CONFIG).unwrap()
}

#[test]
fn test_simulation_creates_one_topic_per_station() {
    let schemas = load_schemas(None, None).unwrap();
    let broker = Arc::new(RecordingBroker::new());

    let simulation = Simulation::new(&config(), &schemas, broker.clone()).unwrap();

    let topics: Vec<String> = broker
        .created_topics()
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(topics, vec!["clark_and_lake", "washington_and_wells"]);
    assert_eq!(simulation.turnstiles().len(), 2);
}

#[test]
fn test_tick_advances_clock_and_publishes() {
    let schemas = load_schemas(None, None).unwrap();
    let broker = Arc::new(RecordingBroker::new());
    let mut simulation = Simulation::new(&config(), &schemas, broker.clone()).unwrap();

    simulation.tick();

    assert_eq!(simulation.ticks(), 1);
    assert_eq!(
        simulation.timestamp(),
        Utc.with_ymd_and_hms(2024, 3, 4, 8, 5, 0).unwrap()
    );
    // Monday 08:00 rush hour on a 20000/day station: plenty of riders in 5 minutes
    let records = broker.records();
    assert!(records.iter().any(|r| r.topic == "clark_and_lake"));
    assert!(records.iter().any(|r| r.topic == "washington_and_wells"));
}

#[test]
fn test_same_seed_same_ridership() {
    let schemas = load_schemas(None, None).unwrap();
    let first = Arc::new(RecordingBroker::new());
    let second = Arc::new(RecordingBroker::new());

    let mut a = Simulation::new(&config(), &schemas, first.clone()).unwrap();
    let mut b = Simulation::new(&config(), &schemas, second.clone()).unwrap();
    for _ in 0..3 {
        a.tick();
        b.tick();
    }

    let topics = |broker: &RecordingBroker| -> Vec<String> {
        broker.records().into_iter().map(|r| r.topic).collect()
    };
    assert_eq!(topics(&first), topics(&second));
}

#[test]
fn test_failed_topic_creation_aborts_setup() {
    let schemas = load_schemas(None, None).unwrap();
    let broker = Arc::new(RecordingBroker::new().fail_topic_creation());

    assert!(Simulation::new(&config(), &schemas, broker).is_err());
}

#[tokio::test]
async fn test_run_stops_after_num_ticks() {
    let schemas = load_schemas(None, None).unwrap();
    let broker = Arc::new(DryRunBroker::new(schemas.clone()));
    let config = config();
    let mut simulation = Simulation::new(&config, &schemas, broker.clone()).unwrap();

    let ran = simulation
        .run(config.num_ticks, config.tick_interval(), std::future::pending())
        .await;

    assert_eq!(ran, 3);
    assert_eq!(simulation.ticks(), 3);
    assert!(broker.published() > 0);
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let schemas = load_schemas(None, None).unwrap();
    let broker = Arc::new(DryRunBroker::new(schemas.clone()));
    let mut simulation = Simulation::new(&config(), &schemas, broker).unwrap();

    // Unlimited ticks, one per hour of wall time: only shutdown can end it
    let ran = simulation
        .run(0, Duration::from_secs(3600), tokio::time::sleep(Duration::from_millis(50)))
        .await;

    // The first interval tick fires immediately
    assert_eq!(ran, 1);
}

#[test]
fn test_load_schemas_from_files() {
    let mut key = tempfile::NamedTempFile::new().unwrap();
    key.write_all(
        br#"{"type": "record", "name": "key", "fields": [{"name": "timestamp", "type": "long"}]}"#,
    )
    .unwrap();

    let schemas = load_schemas(Some(key.path()), None).unwrap();
    let broker = Arc::new(RecordingBroker::new());
    let mut simulation = Simulation::new(&config(), &schemas, broker.clone()).unwrap();
    simulation.tick();

    assert!(!broker.records().is_empty());
}

#[test]
fn test_load_schemas_missing_file() {
    assert!(load_schemas(None, Some(std::path::Path::new("/nonexistent.json"))).is_err());
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.stations.len(), 2);
    assert_eq!(config.time_step, Duration::from_secs(300));
}
