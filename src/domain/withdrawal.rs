use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A creator's request to pay out part of their royalty balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Withdrawal {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub payout_destination: String,
    pub status: WithdrawalStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct WithdrawalCreate {
    pub user_id: String,
    pub amount: Decimal,
    pub payout_destination: String,
}
