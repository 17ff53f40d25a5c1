//! The broker seam producers publish through.

use crate::error::{PublishError, TopicAdminError};
use crate::topic::TopicSpec;

/// An encoded record ready to hand to the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRecord {
    pub topic: String,
    pub key: Vec<u8>,
    pub payload: Vec<u8>,
}

/// Topic administration and the publish primitive.
///
/// `produce` must not wait for broker acknowledgment. Implementations that
/// track delivery do so in the background.
pub trait BrokerClient: Send + Sync {
    /// Create `topic` if it does not exist yet. An existing topic is not an error.
    fn create_topic(&self, topic: &TopicSpec) -> Result<(), TopicAdminError>;

    /// Hand one record to the broker.
    fn produce(&self, record: OutboundRecord) -> Result<(), PublishError>;
}
