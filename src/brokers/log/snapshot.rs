use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::brokers::log::consumer_registry::ConsumerState;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerStats {
    /// Topic name -> number of messages in its log
    pub topics: BTreeMap<String, u64>,
    pub consumers: BTreeMap<String, ConsumerState>,
    /// Producer id -> topic
    pub producers: BTreeMap<String, String>,
}

impl BrokerStats {
    pub fn total_messages(&self) -> u64 {
        self.topics.values().sum()
    }
}
