use thiserror::Error;

use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order is {0:?}, expected pending")]
    InvalidState(OrderStatus),
    #[error("Payment signature mismatch")]
    InvalidSignature,
    #[error("Not the order owner")]
    Forbidden,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
