//! Transactional email dispatch.
//!
//! Callers enqueue a [`Notification`]; the notification actor renders it and
//! hands it to a [`Mailer`]. Delivery failures are logged and never reach the
//! caller.

pub mod service;
pub mod templates;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub use service::*;
pub use templates::*;

#[derive(Debug, Clone, PartialEq)]
pub enum EmailKind {
    PreOrderReceived { campaign_name: String, entry_id: String, quantity: u32, amount: Decimal },
    PreOrderConfirmed { campaign_name: String, entry_id: String, estimated_delivery: Option<DateTime<Utc>> },
    ProductionStarted { campaign_name: String, entry_id: String },
    Shipped { campaign_name: String, entry_id: String, tracking_number: String },
    PreOrderRefunded { campaign_name: String, entry_id: String, amount: Decimal, reason: String },
    OrderPaid { order_id: String, total: Decimal },
    WithdrawalReviewed { withdrawal_id: String, amount: Decimal, approved: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub to_email: String,
    pub to_name: String,
    pub kind: EmailKind,
}
