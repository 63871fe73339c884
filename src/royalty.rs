//! Royalty crediting for paid storefront orders.

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::clients::{DesignClient, UserClient};
use crate::domain::{Order, OrderItem};

#[derive(Debug, Clone, PartialEq)]
pub struct RoyaltyCredit {
    pub design_id: String,
    pub creator_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    UnknownDesign,
    SelfPurchase,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoyaltySkip {
    pub design_id: String,
    pub reason: SkipReason,
}

/// What one run of the ledger did for an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoyaltyReport {
    pub credits: Vec<RoyaltyCredit>,
    pub skipped: Vec<RoyaltySkip>,
}

/// Credits design creators a share of every line that carries their design.
#[derive(Clone)]
pub struct RoyaltyLedger {
    designs: DesignClient,
    users: UserClient,
    rate: Decimal,
}

/// `rate * unit_price * quantity`, rounded to cents.
pub fn royalty_amount(rate: Decimal, item: &OrderItem) -> Decimal {
    (rate * item.line_total()).round_dp(2)
}

impl RoyaltyLedger {
    pub fn new(designs: DesignClient, users: UserClient, rate: Decimal) -> Self {
        Self { designs, users, rate }
    }

    /// Runs after the order is already paid. Nothing here fails the order;
    /// every problem becomes a logged skip.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn credit_order(&self, order: &Order) -> RoyaltyReport {
        let mut report = RoyaltyReport::default();

        for item in &order.items {
            let Some(design_id) = item.design_id.clone() else {
                continue;
            };

            let creator_id = match self.designs.resolve_creator(design_id.clone()).await {
                Ok(Some(creator_id)) => creator_id,
                Ok(None) => {
                    warn!(%design_id, "Design creator not found; royalty skipped");
                    report.skipped.push(RoyaltySkip { design_id, reason: SkipReason::UnknownDesign });
                    continue;
                }
                Err(e) => {
                    warn!(%design_id, error = %e, "Design lookup failed; royalty skipped");
                    report.skipped.push(RoyaltySkip { design_id, reason: SkipReason::Failed(e.to_string()) });
                    continue;
                }
            };

            if creator_id == order.user_id {
                info!(%design_id, "Creator bought their own design; no royalty");
                report.skipped.push(RoyaltySkip { design_id, reason: SkipReason::SelfPurchase });
                continue;
            }

            let amount = royalty_amount(self.rate, item);
            match self.users.credit_royalty(creator_id.clone(), amount).await {
                Ok(_) => {
                    info!(%design_id, %creator_id, %amount, "Royalty credited");
                    report.credits.push(RoyaltyCredit { design_id, creator_id, amount });
                }
                Err(e) => {
                    warn!(%design_id, %creator_id, error = %e, "Royalty credit failed");
                    report.skipped.push(RoyaltySkip { design_id, reason: SkipReason::Failed(e.to_string()) });
                }
            }
        }
        report
    }
}
