//! Producer Registry: labels only, nothing in delivery depends on it.

use std::collections::HashMap;
use crate::config::BrokerConfig;
use crate::utils::ids::resolve_id;

#[derive(Debug, Default)]
pub struct ProducerRegistry {
    producers: HashMap<String, String>,
}

impl ProducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the id and records its topic. Re-registering rebinds.
    pub fn register(&mut self, topic: &str, requested: Option<&str>, config: &BrokerConfig) -> String {
        let id = resolve_id(requested, &config.producer_id_prefix, config.id_suffix_len, |id| {
            self.producers.contains_key(id)
        });
        self.producers.insert(id.clone(), topic.to_string());
        id
    }

    pub fn topic_of(&self, id: &str) -> Option<&str> {
        self.producers.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.producers.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.producers.len()
    }
}
