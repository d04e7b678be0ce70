use serde::{Serialize, Deserialize};
use crate::brokers::log::snapshot::BrokerStats;

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub uptime_seconds: u64,
    pub server_time: String,
    pub broker: BrokerStats,
}
