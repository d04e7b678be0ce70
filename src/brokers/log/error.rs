use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokerError {
    #[error("Topic '{0}' not found. Register it first.")]
    TopicNotFound(String),
    #[error("Unknown consumer '{0}'. Register first.")]
    ConsumerNotFound(String),
}

pub type BrokerResult<T> = Result<T, BrokerError>;
