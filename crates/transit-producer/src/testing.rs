//! In-memory stand-ins for Kafka, the clock and event sources.

use crate::client::{BrokerClient, OutboundRecord};
use crate::clock::Clock;
use crate::error::{PublishError, TopicAdminError};
use crate::event_source::EventSource;
use crate::topic::TopicSpec;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Records every topic creation and publish attempt.
#[derive(Default)]
pub struct RecordingBroker {
    topics: Mutex<Vec<TopicSpec>>,
    records: Mutex<Vec<OutboundRecord>>,
    attempts: AtomicUsize,
    failing_attempts: HashSet<usize>,
    fail_topic_creation: bool,
}

impl RecordingBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given zero-based publish attempts fail with a transport error.
    pub fn fail_attempts(mut self, attempts: impl IntoIterator<Item = usize>) -> Self {
        self.failing_attempts.extend(attempts);
        self
    }

    /// Make every topic creation fail.
    pub fn fail_topic_creation(mut self) -> Self {
        self.fail_topic_creation = true;
        self
    }

    pub fn created_topics(&self) -> Vec<TopicSpec> {
        self.topics.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Records that were accepted, in submission order.
    pub fn records(&self) -> Vec<OutboundRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of publish attempts, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl BrokerClient for RecordingBroker {
    fn create_topic(&self, topic: &TopicSpec) -> Result<(), TopicAdminError> {
        if self.fail_topic_creation {
            return Err(TopicAdminError::Rejected {
                topic: topic.name().to_string(),
                reason: "injected failure".to_string(),
            });
        }
        if let Ok(mut topics) = self.topics.lock() {
            topics.push(topic.clone());
        }
        Ok(())
    }

    fn produce(&self, record: OutboundRecord) -> Result<(), PublishError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing_attempts.contains(&attempt) {
            return Err(PublishError::Transport {
                topic: record.topic,
                message: format!("injected failure on attempt {attempt}"),
            });
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
        Ok(())
    }
}

/// Clock that advances by a fixed step on every read.
pub struct SteppingClock {
    next: AtomicI64,
    step: i64,
}

impl SteppingClock {
    pub fn new(start_millis: i64, step_millis: i64) -> Self {
        Self {
            next: AtomicI64::new(start_millis),
            step: step_millis,
        }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(self.step, Ordering::SeqCst)
    }
}

/// Event source returning the same count for every non-zero step.
#[derive(Debug, Clone, Copy)]
pub struct FixedCount(pub u32);

impl EventSource for FixedCount {
    fn entries(&mut self, _timestamp: DateTime<Utc>, time_step: Duration) -> u32 {
        if time_step.is_zero() {
            0
        } else {
            self.0
        }
    }
}
