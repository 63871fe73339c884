use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::campaign_actor::{CampaignError, CampaignRequest, CampaignTransition, PreOrderFilter};
use crate::clients::{ProductClient, UserClient};
use crate::domain::{
    Campaign, CampaignCreate, CampaignPatch, CampaignStatus, PreOrderEntry, PreOrderRequest,
    PreOrderStatus,
};
use crate::notify::{EmailKind, Notification, Notifier};
use crate::payment::PaymentVerifier;

/// Raw request/response access to the campaign actor.
#[derive(Clone)]
pub struct CampaignHandle {
    sender: mpsc::Sender<CampaignRequest>,
}

impl CampaignHandle {
    pub fn new(sender: mpsc::Sender<CampaignRequest>) -> Self {
        Self { sender }
    }

    /// Asks the actor to stop after the messages already queued.
    pub async fn shutdown(&self) {
        if self.sender.send(CampaignRequest::Shutdown).await.is_err() {
            warn!("Campaign actor already stopped");
        }
    }
}

client_method!(CampaignHandle => fn create_campaign(params: CampaignCreate, now: DateTime<Utc>) -> Campaign as CampaignRequest::CreateCampaign, Error = CampaignError);
client_method!(CampaignHandle => fn get_campaign(id: String) -> Option<Campaign> as CampaignRequest::GetCampaign, Error = CampaignError);
client_method!(CampaignHandle => fn list_campaigns(status: Option<CampaignStatus>) -> Vec<Campaign> as CampaignRequest::ListCampaigns, Error = CampaignError);
client_method!(CampaignHandle => fn update_campaign(id: String, patch: CampaignPatch) -> Campaign as CampaignRequest::UpdateCampaign, Error = CampaignError);
client_method!(CampaignHandle => fn delete_campaign(id: String) -> () as CampaignRequest::DeleteCampaign, Error = CampaignError);
client_method!(CampaignHandle => fn activate(id: String) -> Campaign as CampaignRequest::Activate, Error = CampaignError);
client_method!(CampaignHandle => fn place_pre_order(request: PreOrderRequest, now: DateTime<Utc>) -> (PreOrderEntry, Campaign) as CampaignRequest::PlacePreOrder, Error = CampaignError);
client_method!(CampaignHandle => fn get_pre_order(id: String) -> Option<PreOrderEntry> as CampaignRequest::GetPreOrder, Error = CampaignError);
client_method!(CampaignHandle => fn list_pre_orders(filter: PreOrderFilter) -> Vec<PreOrderEntry> as CampaignRequest::ListPreOrders, Error = CampaignError);
client_method!(CampaignHandle => fn cancel_pre_order(id: String, user_id: String, now: DateTime<Utc>) -> PreOrderEntry as CampaignRequest::CancelPreOrder, Error = CampaignError);
client_method!(CampaignHandle => fn record_payment(id: String, user_id: String, payment_id: String, now: DateTime<Utc>) -> PreOrderEntry as CampaignRequest::RecordPayment, Error = CampaignError);
client_method!(CampaignHandle => fn close(id: String, now: DateTime<Utc>) -> CampaignTransition as CampaignRequest::Close, Error = CampaignError);
client_method!(CampaignHandle => fn cancel(id: String, now: DateTime<Utc>) -> CampaignTransition as CampaignRequest::Cancel, Error = CampaignError);
client_method!(CampaignHandle => fn start_production(id: String, now: DateTime<Utc>) -> CampaignTransition as CampaignRequest::StartProduction, Error = CampaignError);
client_method!(CampaignHandle => fn ship_pre_order(id: String, tracking_number: String, now: DateTime<Utc>) -> PreOrderEntry as CampaignRequest::ShipPreOrder, Error = CampaignError);
client_method!(CampaignHandle => fn deliver_pre_order(id: String, now: DateTime<Utc>) -> PreOrderEntry as CampaignRequest::DeliverPreOrder, Error = CampaignError);
client_method!(CampaignHandle => fn fulfill(id: String) -> Campaign as CampaignRequest::Fulfill, Error = CampaignError);

/// Client for campaigns and pre-orders.
///
/// Validates references against the user and product actors, checks gateway
/// signatures and turns every entry transition into a buyer notification.
#[derive(Clone)]
pub struct CampaignClient {
    handle: CampaignHandle,
    user_client: UserClient,
    product_client: ProductClient,
    verifier: Arc<PaymentVerifier>,
    notifier: Notifier,
}

impl CampaignClient {
    pub fn new(
        handle: CampaignHandle,
        user_client: UserClient,
        product_client: ProductClient,
        verifier: Arc<PaymentVerifier>,
        notifier: Notifier,
    ) -> Self {
        Self {
            handle,
            user_client,
            product_client,
            verifier,
            notifier,
        }
    }

    pub fn handle(&self) -> &CampaignHandle {
        &self.handle
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn create_campaign(&self, params: CampaignCreate) -> Result<Campaign, CampaignError> {
        match self.product_client.get_product(params.product_id.clone()).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(CampaignError::InvalidProduct(params.product_id)),
            Err(e) => return Err(CampaignError::ActorCommunicationError(e.to_string())),
        }
        let campaign = self.handle.create_campaign(params, Utc::now()).await?;
        info!(campaign_id = %campaign.id, "Campaign created");
        Ok(campaign)
    }

    pub async fn get_campaign(&self, id: String) -> Result<Option<Campaign>, CampaignError> {
        self.handle.get_campaign(id).await
    }

    pub async fn require_campaign(&self, id: String) -> Result<Campaign, CampaignError> {
        self.handle
            .get_campaign(id.clone())
            .await?
            .ok_or(CampaignError::NotFound(id))
    }

    pub async fn list_campaigns(&self, status: Option<CampaignStatus>) -> Result<Vec<Campaign>, CampaignError> {
        self.handle.list_campaigns(status).await
    }

    pub async fn update_campaign(&self, id: String, patch: CampaignPatch) -> Result<Campaign, CampaignError> {
        self.handle.update_campaign(id, patch).await
    }

    pub async fn delete_campaign(&self, id: String) -> Result<(), CampaignError> {
        self.handle.delete_campaign(id).await
    }

    pub async fn activate_campaign(&self, id: String) -> Result<Campaign, CampaignError> {
        self.handle.activate(id).await
    }

    // -------------------------------------------------------------------------
    // Intake
    // -------------------------------------------------------------------------

    #[instrument(skip(self, request), fields(campaign_id = %request.campaign_id, user_id = %request.user_id))]
    pub async fn place_pre_order(&self, request: PreOrderRequest) -> Result<PreOrderEntry, CampaignError> {
        let buyer = match self.user_client.get_user(request.user_id.clone()).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(CampaignError::InvalidUser(request.user_id)),
            Err(e) => return Err(CampaignError::ActorCommunicationError(e.to_string())),
        };

        let (entry, campaign) = self.handle.place_pre_order(request, Utc::now()).await?;
        info!(
            entry_id = %entry.id,
            quantity = entry.total_quantity,
            campaign_total = campaign.total_quantity,
            "Pre-order placed"
        );

        self.notifier
            .notify(Notification {
                to_email: buyer.email,
                to_name: buyer.name,
                kind: EmailKind::PreOrderReceived {
                    campaign_name: campaign.name,
                    entry_id: entry.id.clone(),
                    quantity: entry.total_quantity,
                    amount: entry.total_amount,
                },
            })
            .await;
        Ok(entry)
    }

    pub async fn require_pre_order(&self, id: String) -> Result<PreOrderEntry, CampaignError> {
        self.handle
            .get_pre_order(id.clone())
            .await?
            .ok_or(CampaignError::PreOrderNotFound(id))
    }

    pub async fn list_pre_orders(&self, filter: PreOrderFilter) -> Result<Vec<PreOrderEntry>, CampaignError> {
        self.handle.list_pre_orders(filter).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_pre_order(&self, id: String, user_id: String) -> Result<PreOrderEntry, CampaignError> {
        let entry = self.handle.cancel_pre_order(id, user_id, Utc::now()).await?;
        info!(entry_id = %entry.id, "Pre-order cancelled by buyer");
        Ok(entry)
    }

    #[instrument(skip(self, signature))]
    pub async fn verify_pre_order_payment(
        &self,
        id: String,
        user_id: String,
        payment_id: String,
        signature: String,
    ) -> Result<PreOrderEntry, CampaignError> {
        if !self.verifier.verify(&id, &payment_id, &signature) {
            warn!("Payment signature rejected");
            return Err(CampaignError::InvalidSignature);
        }
        let entry = self.handle.record_payment(id, user_id, payment_id, Utc::now()).await?;
        info!(entry_id = %entry.id, "Pre-order payment recorded");
        Ok(entry)
    }

    // -------------------------------------------------------------------------
    // Closer and fulfillment
    // -------------------------------------------------------------------------

    /// Closes an active campaign and notifies every buyer whose entry moved.
    #[instrument(skip(self))]
    pub async fn close_campaign(&self, id: String) -> Result<Campaign, CampaignError> {
        let transition = self.handle.close(id, Utc::now()).await?;
        self.notify_transition(&transition).await;
        Ok(transition.campaign)
    }

    #[instrument(skip(self))]
    pub async fn cancel_campaign(&self, id: String) -> Result<Campaign, CampaignError> {
        let transition = self.handle.cancel(id, Utc::now()).await?;
        self.notify_transition(&transition).await;
        Ok(transition.campaign)
    }

    #[instrument(skip(self))]
    pub async fn start_production(&self, id: String) -> Result<Campaign, CampaignError> {
        let transition = self.handle.start_production(id, Utc::now()).await?;
        self.notify_transition(&transition).await;
        Ok(transition.campaign)
    }

    #[instrument(skip(self))]
    pub async fn ship_pre_order(&self, id: String, tracking_number: String) -> Result<PreOrderEntry, CampaignError> {
        let entry = self.handle.ship_pre_order(id, tracking_number, Utc::now()).await?;
        let campaign_name = self.campaign_name(&entry.campaign_id).await;
        self.notify_entry(&campaign_name, &entry).await;
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn deliver_pre_order(&self, id: String) -> Result<PreOrderEntry, CampaignError> {
        self.handle.deliver_pre_order(id, Utc::now()).await
    }

    #[instrument(skip(self))]
    pub async fn fulfill_campaign(&self, id: String) -> Result<Campaign, CampaignError> {
        let campaign = self.handle.fulfill(id).await?;
        info!(campaign_id = %campaign.id, "Campaign fulfilled");
        Ok(campaign)
    }

    async fn campaign_name(&self, campaign_id: &str) -> String {
        match self.handle.get_campaign(campaign_id.to_string()).await {
            Ok(Some(campaign)) => campaign.name,
            _ => campaign_id.to_string(),
        }
    }

    async fn notify_transition(&self, transition: &CampaignTransition) {
        for entry in &transition.affected {
            self.notify_entry(&transition.campaign.name, entry).await;
        }
    }

    /// Emails the buyer about the entry's current status, if it has a template.
    async fn notify_entry(&self, campaign_name: &str, entry: &PreOrderEntry) {
        let campaign_name = campaign_name.to_string();
        let entry_id = entry.id.clone();
        let kind = match entry.status {
            PreOrderStatus::Confirmed => EmailKind::PreOrderConfirmed {
                campaign_name,
                entry_id,
                estimated_delivery: entry.estimated_delivery,
            },
            PreOrderStatus::InProduction => EmailKind::ProductionStarted { campaign_name, entry_id },
            PreOrderStatus::Shipped => EmailKind::Shipped {
                campaign_name,
                entry_id,
                tracking_number: entry.tracking_number.clone().unwrap_or_default(),
            },
            PreOrderStatus::Refunded => EmailKind::PreOrderRefunded {
                campaign_name,
                entry_id,
                amount: entry.total_amount,
                reason: entry.refund_reason.clone().unwrap_or_default(),
            },
            _ => return,
        };

        match self.user_client.get_user(entry.user_id.clone()).await {
            Ok(Some(buyer)) => {
                self.notifier
                    .notify(Notification { to_email: buyer.email, to_name: buyer.name, kind })
                    .await;
            }
            Ok(None) => warn!(user_id = %entry.user_id, "Buyer vanished; no email"),
            Err(e) => warn!(error = %e, "Buyer lookup failed; no email"),
        }
    }
}
