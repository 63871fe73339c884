use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::actor_framework::ResourceActor;
use crate::campaign_actor::CampaignService;
use crate::clients::{
    CampaignClient, CampaignHandle, DesignClient, OrderClient, ProductClient, UserClient,
    WithdrawalClient,
};
use crate::config::ShopConfig;
use crate::domain::{CustomDesign, DesignSubmission, Order, Product, User, Withdrawal};
use crate::http::AppState;
use crate::ids::prefixed_id;
use crate::notify::{LogMailer, Mailer, NotificationService, Notifier};
use crate::payment::PaymentVerifier;
use crate::royalty::RoyaltyLedger;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct ShopSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub design_client: DesignClient,
    pub order_client: OrderClient,
    pub withdrawal_client: WithdrawalClient,
    pub campaign_client: CampaignClient,
    pub notifier: Notifier,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl ShopSystem {
    pub fn new(config: &ShopConfig) -> Self {
        Self::with_mailer(config, Arc::new(LogMailer))
    }

    pub fn with_mailer(config: &ShopConfig, mailer: Arc<dyn Mailer>) -> Self {
        let buffer = config.actor_buffer;
        let mut handles = Vec::new();

        // 1. Notifications
        let (notification_service, notifier) = NotificationService::new(buffer, mailer);
        handles.push(("notifications", tokio::spawn(notification_service.run())));

        // 2. Users and products
        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new("users", buffer, || prefixed_id("usr"));
        let user_client = UserClient::new(user_resource_client, config.admin_emails.clone());
        handles.push(("users", tokio::spawn(user_actor.run())));

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new("products", buffer, || prefixed_id("prd"));
        let product_client = ProductClient::new(product_resource_client);
        handles.push(("products", tokio::spawn(product_actor.run())));

        // 3. Designs
        let (design_actor, design_resource_client) =
            ResourceActor::<CustomDesign>::new("custom_designs", buffer, || prefixed_id("dsg"));
        handles.push(("custom_designs", tokio::spawn(design_actor.run())));
        let (submission_actor, submission_resource_client) =
            ResourceActor::<DesignSubmission>::new("design_submissions", buffer, || prefixed_id("sub"));
        handles.push(("design_submissions", tokio::spawn(submission_actor.run())));
        let design_client = DesignClient::new(
            design_resource_client,
            submission_resource_client,
            product_client.clone(),
        );

        // 4. Orders, with royalties on payment
        let verifier = Arc::new(PaymentVerifier::new(config.payment_key_secret.clone()));
        let ledger = RoyaltyLedger::new(design_client.clone(), user_client.clone(), config.royalty_rate);
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new("orders", buffer, || prefixed_id("ord"));
        let order_client = OrderClient::new(
            order_resource_client,
            user_client.clone(),
            product_client.clone(),
            ledger,
            verifier.clone(),
            notifier.clone(),
        );
        handles.push(("orders", tokio::spawn(order_actor.run())));

        // 5. Withdrawals
        let (withdrawal_actor, withdrawal_resource_client) =
            ResourceActor::<Withdrawal>::new("withdrawals", buffer, || prefixed_id("wdr"));
        let withdrawal_client = WithdrawalClient::new(
            withdrawal_resource_client,
            user_client.clone(),
            notifier.clone(),
            config.min_withdrawal,
        );
        handles.push(("withdrawals", tokio::spawn(withdrawal_actor.run())));

        // 6. Campaigns and pre-orders
        let (campaign_service, campaign_sender) = CampaignService::new(buffer);
        let campaign_client = CampaignClient::new(
            CampaignHandle::new(campaign_sender),
            user_client.clone(),
            product_client.clone(),
            verifier,
            notifier.clone(),
        );
        handles.push(("campaigns", tokio::spawn(campaign_service.run())));

        info!(actors = handles.len(), "Shop system started");
        Self {
            user_client,
            product_client,
            design_client,
            order_client,
            withdrawal_client,
            campaign_client,
            notifier,
            handles,
        }
    }

    /// Shared state for the HTTP layer.
    pub fn app_state(&self) -> AppState {
        AppState {
            users: self.user_client.clone(),
            products: self.product_client.clone(),
            designs: self.design_client.clone(),
            orders: self.order_client.clone(),
            withdrawals: self.withdrawal_client.clone(),
            campaigns: self.campaign_client.clone(),
        }
    }

    /// Stops the campaign actor, drains queued email and waits for every
    /// actor. Actors still referenced elsewhere are aborted after a grace period.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.campaign_client.handle().shutdown().await;
        self.notifier.flush().await;

        // Drop clients to close channels
        drop(self.user_client);
        drop(self.product_client);
        drop(self.design_client);
        drop(self.order_client);
        drop(self.withdrawal_client);
        drop(self.campaign_client);
        drop(self.notifier);

        let mut failed = Vec::new();
        for (name, mut handle) in self.handles.into_iter().rev() {
            match tokio::time::timeout(SHUTDOWN_GRACE, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(actor = name, error = ?e, "Actor task failed");
                    failed.push(name);
                }
                Err(_) => {
                    warn!(actor = name, "Actor did not stop in time; aborting");
                    handle.abort();
                }
            }
        }

        if !failed.is_empty() {
            return Err(format!("Actor tasks failed: {}", failed.join(", ")));
        }
        info!("System shutdown complete.");
        Ok(())
    }
}
