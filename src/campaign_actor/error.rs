use thiserror::Error;

use crate::domain::{CampaignStatus, PreOrderStatus};

/// Errors that can occur during campaign and pre-order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CampaignError {
    #[error("Campaign not found: {0}")]
    NotFound(String),
    #[error("Pre-order not found: {0}")]
    PreOrderNotFound(String),
    #[error("Campaign validation error: {0}")]
    ValidationError(String),
    #[error("Cannot {action} a {from} campaign")]
    InvalidTransition { from: CampaignStatus, action: &'static str },
    #[error("Campaign is not accepting pre-orders ({0})")]
    NotActive(CampaignStatus),
    #[error("Campaign is outside its pre-order window")]
    OutsideWindow,
    #[error("Campaign capacity exceeded: requested {requested}, remaining {remaining}")]
    CapacityExceeded { requested: u32, remaining: u32 },
    #[error("Cannot {action} a {status} pre-order")]
    EntryState { status: PreOrderStatus, action: &'static str },
    #[error("Pre-order payment already recorded")]
    PaymentAlreadyRecorded,
    #[error("Payment signature mismatch")]
    InvalidSignature,
    #[error("{0} pre-orders have not shipped yet")]
    FulfillmentIncomplete(usize),
    #[error("Not the pre-order owner")]
    Forbidden,
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
