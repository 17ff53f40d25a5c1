//! [`BrokerClient`] backed by rdkafka.

use crate::client::{BrokerClient, OutboundRecord};
use crate::error::{PublishError, TopicAdminError};
use crate::topic::TopicSpec;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::{ClientContext, DefaultClientContext};
use rdkafka::error::KafkaResult;
use rdkafka::message::Message;
use rdkafka::producer::{BaseRecord, DeliveryResult, Producer, ProducerContext, ThreadedProducer};
use rdkafka::ClientConfig;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Logs delivery reports as they arrive on the producer's polling thread.
pub struct DeliveryLogger;

impl ClientContext for DeliveryLogger {}

impl ProducerContext for DeliveryLogger {
    type DeliveryOpaque = ();

    fn delivery(&self, delivery_result: &DeliveryResult<'_>, _delivery_opaque: Self::DeliveryOpaque) {
        match delivery_result {
            Ok(message) => debug!(
                "Delivered to '{}' partition {} offset {}",
                message.topic(),
                message.partition(),
                message.offset()
            ),
            Err((err, message)) => warn!("Delivery to '{}' failed: {err}", message.topic()),
        }
    }
}

/// Kafka client that enqueues records without waiting for acknowledgment.
pub struct KafkaBroker {
    producer: ThreadedProducer<DeliveryLogger>,
    admin: AdminClient<DefaultClientContext>,
}

impl KafkaBroker {
    /// Connect to the given brokers (comma-separated, e.g. "localhost:9092").
    pub fn new(brokers: &str) -> KafkaResult<Self> {
        let producer: ThreadedProducer<DeliveryLogger> = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "30000")
            .set("queue.buffering.max.messages", "100000")
            .set("linger.ms", "5")
            .create_with_context(DeliveryLogger)?;

        let admin: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .create()?;

        Ok(Self { producer, admin })
    }

    /// Wait for outstanding deliveries, up to `timeout`.
    pub fn flush(&self, timeout: Duration) -> KafkaResult<()> {
        self.producer.flush(timeout)
    }
}

impl BrokerClient for KafkaBroker {
    fn create_topic(&self, topic: &TopicSpec) -> Result<(), TopicAdminError> {
        let new_topic = NewTopic::new(
            topic.name(),
            topic.partitions(),
            TopicReplication::Fixed(topic.replicas()),
        );
        let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(10)));

        let results = futures::executor::block_on(self.admin.create_topics(&[new_topic], &opts))?;

        for result in results {
            match result {
                Ok(topic_name) => {
                    info!("Topic '{}' created successfully", topic_name);
                }
                Err((topic_name, err)) => {
                    let err_str = err.to_string();
                    if err_str.contains("already exists")
                        || err_str.contains("TopicExistsException")
                    {
                        info!("Topic '{}' already exists", topic_name);
                    } else {
                        return Err(TopicAdminError::Rejected {
                            topic: topic_name,
                            reason: err_str,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn produce(&self, record: OutboundRecord) -> Result<(), PublishError> {
        let base = BaseRecord::to(&record.topic)
            .key(&record.key[..])
            .payload(&record.payload[..]);

        self.producer
            .send(base)
            .map_err(|(err, _)| PublishError::Transport {
                topic: record.topic.clone(),
                message: err.to_string(),
            })
    }
}
