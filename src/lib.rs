pub mod server;
pub mod brokers;
pub mod utils;
pub mod config;
pub mod system_snapshot;

use std::sync::Arc;
use std::time::Instant;
use crate::brokers::log::BrokerCore;
use crate::config::BrokerConfig;
use crate::system_snapshot::SystemSnapshot;

// ========================================
// ENGINE (The Singleton)
// ========================================

/// Shared handle to the broker. Cheap to clone.
#[derive(Clone)]
pub struct BrokerEngine {
    pub core: Arc<BrokerCore>,
    pub start_time: Instant,
}

impl BrokerEngine {
    pub fn new(config: BrokerConfig) -> Self {
        Self {
            core: Arc::new(BrokerCore::new(config)),
            start_time: Instant::now(),
        }
    }

    pub fn system_snapshot(&self) -> SystemSnapshot {
        SystemSnapshot {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            server_time: chrono::Utc::now().to_rfc3339(),
            broker: self.core.stats(),
        }
    }
}
