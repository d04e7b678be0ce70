//! Consumer Registry: consumer identity -> bound topic, plus per-topic cursors
//!
//! The registry only records which topic a consumer reads from. The cursor
//! itself (next offset to read) lives in a `CursorTable` owned by that
//! topic, so it is guarded by the same lock as the log it points into.

use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::config::BrokerConfig;
use crate::utils::ids::resolve_id;

/// Point-in-time view of one consumer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerState {
    pub topic: String,
    pub offset: u64,
}

#[derive(Debug, Default)]
pub struct ConsumerRegistry {
    bindings: HashMap<String, String>,
}

impl ConsumerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_id(&self, requested: Option<&str>, config: &BrokerConfig) -> String {
        resolve_id(requested, &config.consumer_id_prefix, config.id_suffix_len, |id| {
            self.bindings.contains_key(id)
        })
    }

    /// Binds `id` to `topic`, returning the previously bound topic if any.
    pub fn bind(&mut self, id: String, topic: String) -> Option<String> {
        self.bindings.insert(id, topic)
    }

    pub fn topic_of(&self, id: &str) -> Option<&str> {
        self.bindings.get(id).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }
}

/// Cursors of the consumers bound to one topic.
#[derive(Debug, Default)]
pub struct CursorTable {
    offsets: HashMap<String, u64>,
}

impl CursorTable {
    /// (Re)starts `id` at offset 0.
    pub fn reset(&mut self, id: &str) {
        self.offsets.insert(id.to_string(), 0);
    }

    pub fn remove(&mut self, id: &str) -> Option<u64> {
        self.offsets.remove(id)
    }

    pub fn offset(&self, id: &str) -> Option<u64> {
        self.offsets.get(id).copied()
    }

    /// Moves `id` past the message it was just handed.
    pub fn advance(&mut self, id: &str) {
        if let Some(offset) = self.offsets.get_mut(id) {
            *offset += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.offsets.iter()
    }
}
