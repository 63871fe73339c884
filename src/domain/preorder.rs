use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

/// Lifecycle of a single pre-order entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreOrderStatus {
    Pending,
    Confirmed,
    InProduction,
    Shipped,
    Delivered,
    Refunded,
    Cancelled,
}

impl PreOrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProduction => "in_production",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PreOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreOrderItem {
    pub size: Size,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// One buyer's order against a campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreOrderEntry {
    pub id: String,
    pub campaign_id: String,
    pub user_id: String,
    pub items: Vec<PreOrderItem>,
    pub total_quantity: u32,
    pub total_amount: Decimal,
    pub shipping_address: ShippingAddress,
    pub payment_status: PaymentStatus,
    pub status: PreOrderStatus,
    pub payment_id: Option<String>,
    pub refund_reason: Option<String>,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A requested line: size and quantity only, the price comes from the campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct PreOrderLine {
    pub size: Size,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct PreOrderRequest {
    pub campaign_id: String,
    pub user_id: String,
    pub items: Vec<PreOrderLine>,
    pub shipping_address: ShippingAddress,
}

impl PreOrderEntry {
    /// Whether this entry contributes to its campaign's aggregates.
    pub fn is_counted(&self) -> bool {
        self.status != PreOrderStatus::Cancelled
    }
}
