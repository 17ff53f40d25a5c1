//! Error types for transit producers.

use thiserror::Error;

/// Errors raised while building a producer. The producer is never usable
/// after one of these.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Key schema is required for topic '{0}'")]
    MissingKeySchema(String),

    #[error("Value schema is required for topic '{0}'")]
    MissingValueSchema(String),

    #[error("Topic name must not be empty")]
    EmptyTopicName,

    #[error("Topic '{topic}' needs at least one partition, got {partitions}")]
    InvalidPartitions { topic: String, partitions: i32 },

    #[error("Topic '{topic}' needs at least one replica, got {replicas}")]
    InvalidReplicas { topic: String, replicas: i32 },

    #[error("Topic creation error: {0}")]
    TopicCreation(#[from] TopicAdminError),
}

/// Errors returned by a broker client while creating a topic.
#[derive(Error, Debug)]
pub enum TopicAdminError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Failed to create topic {topic}: {reason}")]
    Rejected { topic: String, reason: String },
}

/// Errors that can occur while publishing a single message.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("{part} for topic '{topic}' does not match its schema")]
    SchemaMismatch { topic: String, part: RecordPart },

    #[error("Avro encoding error for topic '{topic}': {message}")]
    Encoding { topic: String, message: String },

    #[error("Transport error for topic '{topic}': {message}")]
    Transport { topic: String, message: String },
}

/// Which half of a record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPart {
    Key,
    Value,
}

impl std::fmt::Display for RecordPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordPart::Key => write!(f, "Key"),
            RecordPart::Value => write!(f, "Value"),
        }
    }
}

/// Errors that can occur while loading an Avro schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error reading schema {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid Avro schema: {0}")]
    Parse(String),

    #[error("Avro decoding error: {0}")]
    Decode(String),
}
