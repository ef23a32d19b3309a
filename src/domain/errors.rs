use thiserror::Error;

use super::order::OrderId;

/// Failures surfaced by an [`OrderRepository`](super::ports::OrderRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("order {0} not found")]
    NotFound(OrderId),
    #[error("order {0} already exists")]
    AlreadyExists(OrderId),
    #[error("failed to encode order: {0}")]
    Encoding(String),
    #[error("failed to decode order: {0}")]
    Decoding(String),
    #[error("order store unavailable: {0}")]
    StoreUnavailable(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}
