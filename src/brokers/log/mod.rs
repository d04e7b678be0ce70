pub mod message;
pub mod topic_log;
pub mod consumer_registry;
pub mod producer_registry;
pub mod broker_core;
pub mod snapshot;
pub mod error;

pub use broker_core::BrokerCore;
pub use message::Message;
pub use error::{BrokerError, BrokerResult};
