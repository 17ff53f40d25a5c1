//! Schema-validated producer bound to a single topic.
//!
//! A [`TopicProducer`] is only obtainable through [`TopicProducerBuilder::build`],
//! which checks the schemas and topic layout before the topic is created. A
//! producer that exists is therefore always fully configured.
//!
//! ```rust,ignore
//! let producer = TopicProducer::builder("clark_and_lake")
//!     .key_schema(schemas.key.clone())
//!     .value_schema(schemas.value.clone())
//!     .partitions(1)
//!     .replicas(1)
//!     .build(client)?;
//!
//! producer.publish(&key, &value)?;
//! ```

use crate::client::{BrokerClient, OutboundRecord};
use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigurationError, PublishError, RecordPart};
use crate::schema::SchemaHandle;
use crate::topic::TopicSpec;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Builder for [`TopicProducer`].
pub struct TopicProducerBuilder {
    topic: String,
    key_schema: Option<SchemaHandle>,
    value_schema: Option<SchemaHandle>,
    partitions: i32,
    replicas: i32,
    clock: Arc<dyn Clock>,
}

impl TopicProducerBuilder {
    pub fn key_schema(mut self, schema: SchemaHandle) -> Self {
        self.key_schema = Some(schema);
        self
    }

    pub fn value_schema(mut self, schema: SchemaHandle) -> Self {
        self.value_schema = Some(schema);
        self
    }

    pub fn partitions(mut self, partitions: i32) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    /// Replace the clock used for key timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate the configuration, create the topic and return the producer.
    pub fn build(self, client: Arc<dyn BrokerClient>) -> Result<TopicProducer, ConfigurationError> {
        if self.topic.is_empty() {
            return Err(ConfigurationError::EmptyTopicName);
        }
        let key_schema = self
            .key_schema
            .ok_or_else(|| ConfigurationError::MissingKeySchema(self.topic.clone()))?;
        let value_schema = self
            .value_schema
            .ok_or_else(|| ConfigurationError::MissingValueSchema(self.topic.clone()))?;
        if self.partitions < 1 {
            return Err(ConfigurationError::InvalidPartitions {
                topic: self.topic,
                partitions: self.partitions,
            });
        }
        if self.replicas < 1 {
            return Err(ConfigurationError::InvalidReplicas {
                topic: self.topic,
                replicas: self.replicas,
            });
        }

        let topic = TopicSpec::new(self.topic, self.partitions, self.replicas);
        client.create_topic(&topic)?;

        info!(
            "Producer ready for topic '{}' ({} partitions, {} replicas)",
            topic.name(),
            topic.partitions(),
            topic.replicas()
        );

        Ok(TopicProducer {
            topic,
            key_schema,
            value_schema,
            client,
            clock: self.clock,
        })
    }
}

/// Publishes schema-validated records to one topic.
pub struct TopicProducer {
    topic: TopicSpec,
    key_schema: SchemaHandle,
    value_schema: SchemaHandle,
    client: Arc<dyn BrokerClient>,
    clock: Arc<dyn Clock>,
}

impl TopicProducer {
    /// Start building a producer for `topic`. Partitions and replicas default to 1.
    pub fn builder(topic: impl Into<String>) -> TopicProducerBuilder {
        TopicProducerBuilder {
            topic: topic.into(),
            key_schema: None,
            value_schema: None,
            partitions: 1,
            replicas: 1,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn topic(&self) -> &TopicSpec {
        &self.topic
    }

    /// Encode `key` and `value` against the schema pair and hand the record to
    /// the broker client. Does not wait for acknowledgment.
    pub fn publish<K, V>(&self, key: &K, value: &V) -> Result<(), PublishError>
    where
        K: Serialize,
        V: Serialize,
    {
        let topic = self.topic.name();
        let key_bytes = self.key_schema.encode(topic, RecordPart::Key, key)?;
        let payload = self.value_schema.encode(topic, RecordPart::Value, value)?;

        self.client.produce(OutboundRecord {
            topic: topic.to_string(),
            key: key_bytes,
            payload,
        })?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                "Published to '{}': key={} value={}",
                topic,
                serde_json::to_string(key).unwrap_or_default(),
                serde_json::to_string(value).unwrap_or_default()
            );
        }
        Ok(())
    }

    /// Current wall-clock time in milliseconds.
    pub fn current_time_millis(&self) -> i64 {
        self.clock.now_millis()
    }
}
