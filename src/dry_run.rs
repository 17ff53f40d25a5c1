//! Broker client that logs records instead of sending them.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};
use transit_producer::{
    BrokerClient, OutboundRecord, PublishError, SchemaError, SchemaPair, TopicAdminError,
    TopicSpec,
};

/// Counts what would have been sent to Kafka and logs each record as JSON.
#[derive(Debug)]
pub struct DryRunBroker {
    schemas: SchemaPair,
    published: AtomicU64,
}

impl DryRunBroker {
    /// `schemas` decode the encoded key and payload back for logging.
    pub fn new(schemas: SchemaPair) -> Self {
        Self {
            schemas,
            published: AtomicU64::new(0),
        }
    }

    /// Records accepted so far.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// JSON rendering of `record` with its key and value decoded.
    pub fn render(&self, record: &OutboundRecord) -> Result<String, SchemaError> {
        let key = self.schemas.key.decode_json(&record.key)?;
        let value = self.schemas.value.decode_json(&record.payload)?;
        let rendered = serde_json::json!({
            "topic": record.topic,
            "key": key,
            "value": value,
        });
        Ok(rendered.to_string())
    }
}

impl BrokerClient for DryRunBroker {
    fn create_topic(&self, topic: &TopicSpec) -> Result<(), TopicAdminError> {
        info!(
            "[dry-run] Would create topic '{}' ({} partitions, {} replicas)",
            topic.name(),
            topic.partitions(),
            topic.replicas()
        );
        Ok(())
    }

    fn produce(&self, record: OutboundRecord) -> Result<(), PublishError> {
        self.published.fetch_add(1, Ordering::Relaxed);
        match self.render(&record) {
            Ok(json) => info!("[dry-run] {json}"),
            Err(e) => warn!(
                "[dry-run] Would publish to '{}': {} key bytes, {} payload bytes ({e})",
                record.topic,
                record.key.len(),
                record.payload.len()
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use transit_producer::testing::RecordingBroker;
    use transit_producer::{TopicProducer, TurnstileKey, TurnstileValue};

    fn encoded_record(schemas: &SchemaPair) -> OutboundRecord {
        let recorder = Arc::new(RecordingBroker::new());
        let producer = TopicProducer::builder("clark_and_lake")
            .key_schema(schemas.key.clone())
            .value_schema(schemas.value.clone())
            .build(recorder.clone())
            .unwrap();
        producer
            .publish(
                &TurnstileKey { timestamp: 1_000 },
                &TurnstileValue {
                    station_name: "Clark/Lake".to_string(),
                    station_id: 1,
                    line: "Green".to_string(),
                },
            )
            .unwrap();
        recorder.records().remove(0)
    }

    #[test]
    fn test_render_decodes_key_and_value() {
        let schemas = SchemaPair::turnstile().unwrap();
        let broker = DryRunBroker::new(schemas.clone());

        let json = broker.render(&encoded_record(&schemas)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["topic"], "clark_and_lake");
        assert_eq!(parsed["key"]["timestamp"], 1_000);
        assert_eq!(parsed["value"]["station_name"], "Clark/Lake");
        assert_eq!(parsed["value"]["line"], "Green");
    }

    #[test]
    fn test_produce_counts_undecodable_records() {
        let schemas = SchemaPair::turnstile().unwrap();
        let broker = DryRunBroker::new(schemas);
        let record = OutboundRecord {
            topic: "clark_and_lake".to_string(),
            key: Vec::new(),
            payload: Vec::new(),
        };

        assert!(broker.render(&record).is_err());
        broker.produce(record).unwrap();
        assert_eq!(broker.published(), 1);
    }
}
