//! Topic Log: append-only, offset-indexed message sequence
//!
//! Offsets are zero-based and contiguous: the message at index `i`
//! always carries offset `i`. The log only grows.

use crate::brokers::log::message::Message;

/// Storage seam for a single topic's log.
///
/// `BrokerCore` only talks to the log through this trait, so a bounded or
/// segmented store can replace `TopicLog` without touching delivery logic.
/// Implementations are always accessed under the owning topic's lock.
pub trait LogStore: Send + 'static {
    fn open(topic: &str) -> Self where Self: Sized;

    /// Appends a new message and returns its offset (the previous length).
    fn append(&mut self, value: String, key: Option<String>) -> u64;

    /// Message at `offset`, or `None` once past the end of the log.
    fn at(&self, offset: u64) -> Option<Message>;

    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory log. Data is lost on restart.
#[derive(Debug)]
pub struct TopicLog {
    topic: String,
    messages: Vec<Message>,
}

impl TopicLog {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            messages: Vec::new(),
        }
    }
}

impl LogStore for TopicLog {
    fn open(topic: &str) -> Self {
        Self::new(topic)
    }

    fn append(&mut self, value: String, key: Option<String>) -> u64 {
        let offset = self.messages.len() as u64;
        self.messages.push(Message {
            topic: self.topic.clone(),
            offset,
            value,
            key,
        });
        offset
    }

    fn at(&self, offset: u64) -> Option<Message> {
        let idx = usize::try_from(offset).ok()?;
        self.messages.get(idx).cloned()
    }

    fn len(&self) -> u64 {
        self.messages.len() as u64
    }
}
