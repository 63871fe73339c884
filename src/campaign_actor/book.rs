use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::CampaignError;
use crate::domain::{
    Campaign, CampaignCreate, CampaignPatch, CampaignStatus, PaymentStatus, PreOrderEntry,
    PreOrderItem, PreOrderRequest, PreOrderStatus,
};
use crate::ids::prefixed_id;

type Result<T> = std::result::Result<T, CampaignError>;

/// Result of a campaign-wide transition: the campaign after the change and
/// every entry whose status moved with it.
#[derive(Debug, Clone)]
pub struct CampaignTransition {
    pub campaign: Campaign,
    pub affected: Vec<PreOrderEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct PreOrderFilter {
    pub campaign_id: Option<String>,
    pub user_id: Option<String>,
}

/// In-memory state behind the campaign actor.
///
/// Every method either fully applies or returns an error without touching
/// state, which is what makes a single actor turn behave like a transaction.
#[derive(Debug, Default)]
pub struct CampaignBook {
    campaigns: HashMap<String, Campaign>,
    entries: HashMap<String, PreOrderEntry>,
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end <= start {
        return Err(CampaignError::ValidationError(
            "end_date must be after start_date".to_string(),
        ));
    }
    Ok(())
}

fn validate_quantities(min: u32, max: Option<u32>) -> Result<()> {
    if min == 0 {
        return Err(CampaignError::ValidationError("min_quantity must be at least 1".to_string()));
    }
    if let Some(max) = max {
        if max < min {
            return Err(CampaignError::ValidationError(
                "max_quantity must not be below min_quantity".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(CampaignError::ValidationError("unit_price must be positive".to_string()));
    }
    Ok(())
}

impl CampaignBook {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    pub fn create_campaign(&mut self, params: CampaignCreate, now: DateTime<Utc>) -> Result<Campaign> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(CampaignError::ValidationError("name is required".to_string()));
        }
        validate_window(params.start_date, params.end_date)?;
        validate_quantities(params.min_quantity, params.max_quantity)?;
        validate_price(params.unit_price)?;

        let campaign = Campaign {
            id: prefixed_id("cmp"),
            product_id: params.product_id,
            name,
            description: params.description,
            start_date: params.start_date,
            end_date: params.end_date,
            unit_price: params.unit_price,
            min_quantity: params.min_quantity,
            max_quantity: params.max_quantity,
            delivery_days: params.delivery_days,
            status: CampaignStatus::Draft,
            total_orders: 0,
            total_quantity: 0,
            total_revenue: Decimal::ZERO,
            created_at: now,
            closed_at: None,
        };
        self.campaigns.insert(campaign.id.clone(), campaign.clone());
        Ok(campaign)
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.get(id)
    }

    fn require_campaign(&self, id: &str) -> Result<&Campaign> {
        self.campaigns
            .get(id)
            .ok_or_else(|| CampaignError::NotFound(id.to_string()))
    }

    fn require_campaign_mut(&mut self, id: &str) -> Result<&mut Campaign> {
        self.campaigns
            .get_mut(id)
            .ok_or_else(|| CampaignError::NotFound(id.to_string()))
    }

    /// Campaigns ordered by start date, optionally restricted to one status.
    pub fn list_campaigns(&self, status: Option<CampaignStatus>) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .values()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        campaigns.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        campaigns
    }

    pub fn update_campaign(&mut self, id: &str, patch: CampaignPatch) -> Result<Campaign> {
        let current = self.require_campaign(id)?;
        if !matches!(current.status, CampaignStatus::Draft | CampaignStatus::Active) {
            return Err(CampaignError::InvalidTransition { from: current.status, action: "edit" });
        }
        let is_draft = current.status == CampaignStatus::Draft;
        if !is_draft && (patch.min_quantity.is_some() || patch.unit_price.is_some() || patch.start_date.is_some()) {
            return Err(CampaignError::ValidationError(
                "start_date, min_quantity and unit_price can only change while in draft".to_string(),
            ));
        }

        let mut updated = current.clone();
        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CampaignError::ValidationError("name is required".to_string()));
            }
            updated.name = name;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(start) = patch.start_date {
            updated.start_date = start;
        }
        if let Some(end) = patch.end_date {
            updated.end_date = end;
        }
        if let Some(price) = patch.unit_price {
            validate_price(price)?;
            updated.unit_price = price;
        }
        if let Some(min) = patch.min_quantity {
            updated.min_quantity = min;
        }
        if let Some(max) = patch.max_quantity {
            if max < updated.total_quantity {
                return Err(CampaignError::ValidationError(format!(
                    "max_quantity {max} is below the {} units already ordered",
                    updated.total_quantity
                )));
            }
            updated.max_quantity = Some(max);
        }
        if let Some(days) = patch.delivery_days {
            updated.delivery_days = days;
        }
        validate_window(updated.start_date, updated.end_date)?;
        validate_quantities(updated.min_quantity, updated.max_quantity)?;

        self.campaigns.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// Drafts can always be deleted; other non-active campaigns only when no
    /// pre-order was ever placed against them, buyer-cancelled ones included.
    pub fn delete_campaign(&mut self, id: &str) -> Result<()> {
        let campaign = self.require_campaign(id)?;
        let deletable = match campaign.status {
            CampaignStatus::Draft => true,
            CampaignStatus::Active => false,
            _ => !self.entries.values().any(|entry| entry.campaign_id == id),
        };
        if !deletable {
            return Err(CampaignError::InvalidTransition { from: campaign.status, action: "delete" });
        }
        self.campaigns.remove(id);
        self.entries.retain(|_, entry| entry.campaign_id != id);
        Ok(())
    }

    pub fn activate(&mut self, id: &str) -> Result<Campaign> {
        let campaign = self.require_campaign_mut(id)?;
        if campaign.status != CampaignStatus::Draft {
            return Err(CampaignError::InvalidTransition { from: campaign.status, action: "activate" });
        }
        campaign.status = CampaignStatus::Active;
        info!(campaign_id = %id, "Campaign activated");
        Ok(campaign.clone())
    }

    // -------------------------------------------------------------------------
    // Intake
    // -------------------------------------------------------------------------

    /// Records a pre-order and bumps the campaign aggregates.
    ///
    /// There is no idempotency key: submitting the same request twice creates
    /// two entries.
    pub fn place_pre_order(
        &mut self,
        request: PreOrderRequest,
        now: DateTime<Utc>,
    ) -> Result<(PreOrderEntry, Campaign)> {
        if request.items.is_empty() {
            return Err(CampaignError::ValidationError("pre-order has no items".to_string()));
        }
        if request.items.iter().any(|line| line.quantity == 0) {
            return Err(CampaignError::ValidationError("quantity must be at least 1".to_string()));
        }
        let requested = request
            .items
            .iter()
            .try_fold(0u32, |acc, line| acc.checked_add(line.quantity))
            .ok_or_else(|| CampaignError::ValidationError("quantity too large".to_string()))?;

        let campaign = self.require_campaign(&request.campaign_id)?;
        if campaign.status != CampaignStatus::Active {
            return Err(CampaignError::NotActive(campaign.status));
        }
        if !campaign.window_contains(now) {
            return Err(CampaignError::OutsideWindow);
        }
        if let Some(remaining) = campaign.remaining_capacity() {
            if requested > remaining {
                return Err(CampaignError::CapacityExceeded { requested, remaining });
            }
        }

        let unit_price = campaign.unit_price;
        let total_amount = unit_price
            .checked_mul(Decimal::from(requested))
            .ok_or_else(|| CampaignError::ValidationError("order amount too large".to_string()))?;
        let (total_orders, total_quantity, total_revenue) = match (
            campaign.total_orders.checked_add(1),
            campaign.total_quantity.checked_add(requested),
            campaign.total_revenue.checked_add(total_amount),
        ) {
            (Some(orders), Some(quantity), Some(revenue)) => (orders, quantity, revenue),
            _ => {
                return Err(CampaignError::CapacityExceeded {
                    requested,
                    remaining: u32::MAX - campaign.total_quantity,
                })
            }
        };

        let items: Vec<PreOrderItem> = request
            .items
            .into_iter()
            .map(|line| PreOrderItem { size: line.size, quantity: line.quantity, unit_price })
            .collect();

        let entry = PreOrderEntry {
            id: prefixed_id("pre"),
            campaign_id: request.campaign_id,
            user_id: request.user_id,
            items,
            total_quantity: requested,
            total_amount,
            shipping_address: request.shipping_address,
            payment_status: PaymentStatus::Pending,
            status: PreOrderStatus::Pending,
            payment_id: None,
            refund_reason: None,
            tracking_number: None,
            estimated_delivery: None,
            created_at: now,
            updated_at: now,
        };

        let campaign = self.require_campaign_mut(&entry.campaign_id)?;
        campaign.total_orders = total_orders;
        campaign.total_quantity = total_quantity;
        campaign.total_revenue = total_revenue;
        let campaign = campaign.clone();

        debug!(entry_id = %entry.id, quantity = requested, "Pre-order recorded");
        self.entries.insert(entry.id.clone(), entry.clone());
        Ok((entry, campaign))
    }

    pub fn entry(&self, id: &str) -> Option<&PreOrderEntry> {
        self.entries.get(id)
    }

    fn require_entry(&self, id: &str) -> Result<&PreOrderEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| CampaignError::PreOrderNotFound(id.to_string()))
    }

    /// Entries ordered by creation time.
    pub fn list_entries(&self, filter: &PreOrderFilter) -> Vec<PreOrderEntry> {
        let mut entries: Vec<PreOrderEntry> = self
            .entries
            .values()
            .filter(|e| filter.campaign_id.as_ref().map_or(true, |id| &e.campaign_id == id))
            .filter(|e| filter.user_id.as_ref().map_or(true, |id| &e.user_id == id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    /// Buyer withdrawal before close. The entry stops counting toward the
    /// campaign aggregates.
    pub fn cancel_pre_order(&mut self, entry_id: &str, user_id: &str, now: DateTime<Utc>) -> Result<PreOrderEntry> {
        let entry = self.require_entry(entry_id)?;
        if entry.user_id != user_id {
            return Err(CampaignError::Forbidden);
        }
        if entry.status != PreOrderStatus::Pending {
            return Err(CampaignError::EntryState { status: entry.status, action: "cancel" });
        }
        let campaign = self.require_campaign(&entry.campaign_id)?;
        if campaign.status != CampaignStatus::Active {
            return Err(CampaignError::NotActive(campaign.status));
        }

        let quantity = entry.total_quantity;
        let amount = entry.total_amount;
        let campaign_id = entry.campaign_id.clone();

        let campaign = self.require_campaign_mut(&campaign_id)?;
        campaign.total_orders -= 1;
        campaign.total_quantity -= quantity;
        campaign.total_revenue -= amount;

        let entry = self
            .entries
            .get_mut(entry_id)
            .ok_or_else(|| CampaignError::PreOrderNotFound(entry_id.to_string()))?;
        entry.status = PreOrderStatus::Cancelled;
        if entry.payment_status == PaymentStatus::Paid {
            entry.payment_status = PaymentStatus::Refunded;
        }
        entry.updated_at = now;
        Ok(entry.clone())
    }

    /// Stores a gateway payment id. The signature is checked by the caller.
    pub fn record_payment(
        &mut self,
        entry_id: &str,
        user_id: &str,
        payment_id: String,
        now: DateTime<Utc>,
    ) -> Result<PreOrderEntry> {
        let entry = self
            .entries
            .get_mut(entry_id)
            .ok_or_else(|| CampaignError::PreOrderNotFound(entry_id.to_string()))?;
        if entry.user_id != user_id {
            return Err(CampaignError::Forbidden);
        }
        if matches!(entry.status, PreOrderStatus::Cancelled | PreOrderStatus::Refunded) {
            return Err(CampaignError::EntryState { status: entry.status, action: "pay for" });
        }
        if entry.payment_status != PaymentStatus::Pending {
            return Err(CampaignError::PaymentAlreadyRecorded);
        }
        entry.payment_status = PaymentStatus::Paid;
        entry.payment_id = Some(payment_id);
        entry.updated_at = now;
        Ok(entry.clone())
    }

    // -------------------------------------------------------------------------
    // Closer and fulfillment
    // -------------------------------------------------------------------------

    /// Applies `change` to every entry of `campaign_id` currently in `from`.
    fn transition_entries(
        &mut self,
        campaign_id: &str,
        from: PreOrderStatus,
        mut change: impl FnMut(&mut PreOrderEntry),
    ) -> Vec<PreOrderEntry> {
        let mut affected: Vec<PreOrderEntry> = self
            .entries
            .values_mut()
            .filter(|e| e.campaign_id == campaign_id && e.status == from)
            .map(|e| {
                change(e);
                e.clone()
            })
            .collect();
        affected.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        affected
    }

    fn refund_pending(&mut self, campaign_id: &str, reason: &str, now: DateTime<Utc>) -> Vec<PreOrderEntry> {
        self.transition_entries(campaign_id, PreOrderStatus::Pending, |entry| {
            entry.status = PreOrderStatus::Refunded;
            entry.refund_reason = Some(reason.to_string());
            if entry.payment_status == PaymentStatus::Paid {
                entry.payment_status = PaymentStatus::Refunded;
            }
            entry.updated_at = now;
        })
    }

    /// Decides the campaign's fate against its minimum quantity.
    ///
    /// Threshold met: pending entries become confirmed and the campaign closes.
    /// Threshold missed: pending entries are refunded and the campaign is
    /// cancelled. Gateway refunds happen out-of-band.
    pub fn close_campaign(&mut self, id: &str, now: DateTime<Utc>) -> Result<CampaignTransition> {
        let campaign = self.require_campaign(id)?;
        if campaign.status != CampaignStatus::Active {
            return Err(CampaignError::InvalidTransition { from: campaign.status, action: "close" });
        }

        let (status, affected) = if campaign.threshold_met() {
            let eta = now + Duration::days(i64::from(campaign.delivery_days));
            let affected = self.transition_entries(id, PreOrderStatus::Pending, |entry| {
                entry.status = PreOrderStatus::Confirmed;
                entry.estimated_delivery = Some(eta);
                entry.updated_at = now;
            });
            (CampaignStatus::Closed, affected)
        } else {
            let reason = format!(
                "Campaign did not reach minimum quantity ({}/{})",
                campaign.total_quantity, campaign.min_quantity
            );
            (CampaignStatus::Cancelled, self.refund_pending(id, &reason, now))
        };

        let campaign = self.require_campaign_mut(id)?;
        campaign.status = status;
        campaign.closed_at = Some(now);
        info!(
            campaign_id = %id,
            status = %status,
            total_quantity = campaign.total_quantity,
            min_quantity = campaign.min_quantity,
            affected = affected.len(),
            "Campaign closed"
        );
        Ok(CampaignTransition { campaign: campaign.clone(), affected })
    }

    /// Administrative cancellation; every pending entry is refunded.
    pub fn cancel_campaign(&mut self, id: &str, now: DateTime<Utc>) -> Result<CampaignTransition> {
        let campaign = self.require_campaign(id)?;
        if !matches!(campaign.status, CampaignStatus::Draft | CampaignStatus::Active) {
            return Err(CampaignError::InvalidTransition { from: campaign.status, action: "cancel" });
        }
        let affected = self.refund_pending(id, "Campaign cancelled", now);
        let campaign = self.require_campaign_mut(id)?;
        campaign.status = CampaignStatus::Cancelled;
        campaign.closed_at = Some(now);
        info!(campaign_id = %id, affected = affected.len(), "Campaign cancelled");
        Ok(CampaignTransition { campaign: campaign.clone(), affected })
    }

    pub fn start_production(&mut self, id: &str, now: DateTime<Utc>) -> Result<CampaignTransition> {
        let campaign = self.require_campaign(id)?.clone();
        if campaign.status != CampaignStatus::Closed {
            return Err(CampaignError::InvalidTransition { from: campaign.status, action: "start production for" });
        }
        let affected = self.transition_entries(id, PreOrderStatus::Confirmed, |entry| {
            entry.status = PreOrderStatus::InProduction;
            entry.updated_at = now;
        });
        Ok(CampaignTransition { campaign, affected })
    }

    pub fn ship_pre_order(&mut self, entry_id: &str, tracking_number: String, now: DateTime<Utc>) -> Result<PreOrderEntry> {
        if tracking_number.trim().is_empty() {
            return Err(CampaignError::ValidationError("tracking_number is required".to_string()));
        }
        self.advance_entry(entry_id, PreOrderStatus::InProduction, PreOrderStatus::Shipped, "ship", now, |entry| {
            entry.tracking_number = Some(tracking_number.trim().to_string());
        })
    }

    pub fn deliver_pre_order(&mut self, entry_id: &str, now: DateTime<Utc>) -> Result<PreOrderEntry> {
        self.advance_entry(entry_id, PreOrderStatus::Shipped, PreOrderStatus::Delivered, "deliver", now, |_| {})
    }

    fn advance_entry(
        &mut self,
        entry_id: &str,
        from: PreOrderStatus,
        to: PreOrderStatus,
        action: &'static str,
        now: DateTime<Utc>,
        extra: impl FnOnce(&mut PreOrderEntry),
    ) -> Result<PreOrderEntry> {
        let entry = self
            .entries
            .get_mut(entry_id)
            .ok_or_else(|| CampaignError::PreOrderNotFound(entry_id.to_string()))?;
        if entry.status != from {
            return Err(CampaignError::EntryState { status: entry.status, action });
        }
        entry.status = to;
        extra(entry);
        entry.updated_at = now;
        Ok(entry.clone())
    }

    /// Marks a closed campaign fulfilled once every live entry has shipped.
    pub fn fulfill_campaign(&mut self, id: &str) -> Result<Campaign> {
        let campaign = self.require_campaign(id)?;
        if campaign.status != CampaignStatus::Closed {
            return Err(CampaignError::InvalidTransition { from: campaign.status, action: "fulfill" });
        }
        let outstanding = self
            .entries
            .values()
            .filter(|e| e.campaign_id == id)
            .filter(|e| {
                !matches!(
                    e.status,
                    PreOrderStatus::Shipped
                        | PreOrderStatus::Delivered
                        | PreOrderStatus::Refunded
                        | PreOrderStatus::Cancelled
                )
            })
            .count();
        if outstanding > 0 {
            return Err(CampaignError::FulfillmentIncomplete(outstanding));
        }
        let campaign = self.require_campaign_mut(id)?;
        campaign.status = CampaignStatus::Fulfilled;
        Ok(campaign.clone())
    }
}
