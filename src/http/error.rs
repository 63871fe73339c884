//! API error types and HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::campaign_actor::CampaignError;
use crate::design_actor::DesignError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use crate::withdrawal_actor::WithdrawalError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Standard JSON error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Stable machine-readable error code.
    pub code: String,
    pub message: String,
}

/// HTTP API error with stable machine-readable code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }

    /// Overrides the machine-readable code, keeping the status.
    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, message = %self.message, "Request failed");
        }
        let body = ApiErrorBody { code: self.code.to_string(), message: self.message };
        (self.status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        let message = e.to_string();
        match e {
            UserError::NotFound(_) => Self::not_found(message),
            UserError::AlreadyExists(_) => Self::conflict(message).with_code("ALREADY_EXISTS"),
            UserError::ValidationError(_) => Self::bad_request(message),
            UserError::InsufficientBalance { .. } => {
                Self::conflict(message).with_code("INSUFFICIENT_BALANCE")
            }
            UserError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        let message = e.to_string();
        match e {
            ProductError::NotFound(_) => Self::not_found(message),
            ProductError::Inactive(_) => Self::conflict(message),
            ProductError::InsufficientStock { .. } => {
                Self::conflict(message).with_code("INSUFFICIENT_STOCK")
            }
            ProductError::InvalidQuantity(_) | ProductError::ValidationError(_) => {
                Self::bad_request(message)
            }
            ProductError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}

impl From<DesignError> for ApiError {
    fn from(e: DesignError) -> Self {
        let message = e.to_string();
        match e {
            DesignError::NotFound(_) => Self::not_found(message),
            DesignError::ValidationError(_) => Self::bad_request(message),
            DesignError::AlreadyReviewed(_) => Self::conflict(message),
            DesignError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::NotFound(_) => Self::not_found(message),
            OrderError::InvalidProduct(_)
            | OrderError::InvalidUser(_)
            | OrderError::ValidationError(_) => Self::bad_request(message),
            OrderError::InvalidSignature => {
                Self::bad_request(message).with_code("INVALID_SIGNATURE")
            }
            OrderError::InsufficientStock(_) => {
                Self::conflict(message).with_code("INSUFFICIENT_STOCK")
            }
            OrderError::InvalidState(_) => Self::conflict(message).with_code("INVALID_STATE"),
            OrderError::Forbidden => Self::forbidden(message),
            OrderError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}

impl From<WithdrawalError> for ApiError {
    fn from(e: WithdrawalError) -> Self {
        let message = e.to_string();
        match e {
            WithdrawalError::NotFound(_) => Self::not_found(message),
            WithdrawalError::ValidationError(_)
            | WithdrawalError::BelowMinimum(_)
            | WithdrawalError::InvalidUser(_) => Self::bad_request(message),
            WithdrawalError::InsufficientBalance { .. } => {
                Self::conflict(message).with_code("INSUFFICIENT_BALANCE")
            }
            WithdrawalError::AlreadyReviewed(_) => Self::conflict(message),
            WithdrawalError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}

impl From<CampaignError> for ApiError {
    fn from(e: CampaignError) -> Self {
        let message = e.to_string();
        match e {
            CampaignError::NotFound(_) | CampaignError::PreOrderNotFound(_) => {
                Self::not_found(message)
            }
            CampaignError::ValidationError(_)
            | CampaignError::InvalidProduct(_)
            | CampaignError::InvalidUser(_) => Self::bad_request(message),
            CampaignError::InvalidSignature => {
                Self::bad_request(message).with_code("INVALID_SIGNATURE")
            }
            CampaignError::OutsideWindow => Self::bad_request(message).with_code("OUTSIDE_WINDOW"),
            CampaignError::NotActive(_) => Self::conflict(message).with_code("CAMPAIGN_NOT_ACTIVE"),
            CampaignError::CapacityExceeded { .. } => {
                Self::conflict(message).with_code("CAPACITY_EXCEEDED")
            }
            CampaignError::InvalidTransition { .. }
            | CampaignError::EntryState { .. }
            | CampaignError::FulfillmentIncomplete(_) => {
                Self::conflict(message).with_code("INVALID_STATE")
            }
            CampaignError::PaymentAlreadyRecorded => {
                Self::conflict(message).with_code("PAYMENT_ALREADY_RECORDED")
            }
            CampaignError::Forbidden => Self::forbidden(message),
            CampaignError::ActorCommunicationError(_) => Self::internal(message),
        }
    }
}
