use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::WithdrawalStatus;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WithdrawalError {
    #[error("Withdrawal not found: {0}")]
    NotFound(String),
    #[error("Withdrawal validation error: {0}")]
    ValidationError(String),
    #[error("Minimum withdrawal is {0}")]
    BelowMinimum(Decimal),
    #[error("Insufficient royalty balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Decimal, available: Decimal },
    #[error("Withdrawal already reviewed: {0:?}")]
    AlreadyReviewed(WithdrawalStatus),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
