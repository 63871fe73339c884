use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a pre-order campaign.
///
/// `Draft -> Active -> Closed -> Fulfilled`, with `Cancelled` reachable from
/// `Draft` and `Active`, and from `Active` when the minimum is missed at close.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Closed,
    Cancelled,
    Fulfilled,
}

impl CampaignStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
            Self::Fulfilled => "fulfilled",
        }
    }

    /// Terminal states accept no further lifecycle transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Fulfilled)
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time-boxed pre-order drive for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Campaign {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub unit_price: Decimal,
    pub min_quantity: u32,
    pub max_quantity: Option<u32>,
    pub delivery_days: u32,
    pub status: CampaignStatus,
    pub total_orders: u32,
    pub total_quantity: u32,
    pub total_revenue: Decimal,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Payload for creating a campaign. Campaigns always start in `Draft`.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignCreate {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub unit_price: Decimal,
    pub min_quantity: u32,
    pub max_quantity: Option<u32>,
    pub delivery_days: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub unit_price: Option<Decimal>,
    pub min_quantity: Option<u32>,
    pub max_quantity: Option<u32>,
    pub delivery_days: Option<u32>,
}

impl Campaign {
    pub fn threshold_met(&self) -> bool {
        self.total_quantity >= self.min_quantity
    }

    pub fn window_contains(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    /// Units still available before `max_quantity` is reached, if capped.
    pub fn remaining_capacity(&self) -> Option<u32> {
        self.max_quantity
            .map(|max| max.saturating_sub(self.total_quantity))
    }
}
