use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::{ProductClient, UserClient};
use crate::domain::{Order, OrderCreate, OrderItem, OrderLine};
use crate::notify::{EmailKind, Notification, Notifier};
use crate::order_actor::{OrderAction, OrderError};
use crate::payment::PaymentVerifier;
use crate::product_actor::ProductError;
use crate::royalty::RoyaltyLedger;

/// Client for interacting with the Order actor.
///
/// Validates the buyer and every product, reserves stock and prices each line
/// from the catalog before the order is persisted. Payment verification runs
/// the royalty ledger and queues the confirmation email.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
    ledger: RoyaltyLedger,
    verifier: Arc<PaymentVerifier>,
    notifier: Notifier,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient,
        ledger: RoyaltyLedger,
        verifier: Arc<PaymentVerifier>,
        notifier: Notifier,
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
            ledger,
            verifier,
            notifier,
        }
    }

    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn create_order(&self, user_id: String, lines: Vec<OrderLine>) -> Result<Order, OrderError> {
        info!("Processing create_order request (Client Side)");

        // Step 1: Validate user
        match self.user_client.get_user(user_id.clone()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(user_id));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!("User validation failed: {e}")));
            }
        }

        if lines.is_empty() {
            return Err(OrderError::ValidationError("order has no items".to_string()));
        }
        if lines.iter().any(|line| line.quantity == 0) {
            return Err(OrderError::ValidationError("quantity must be at least 1".to_string()));
        }

        // Step 2: Validate products and reserve stock line by line
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            match self.reserve_line(&line).await {
                Ok(item) => items.push(item),
                Err(e) => {
                    self.release_items(&items).await;
                    return Err(e);
                }
            }
        }
        info!("Stock reserved successfully");

        // Step 3: Create order in ResourceActor
        match self.inner.create(OrderCreate { user_id, items: items.clone() }).await {
            Ok(order) => {
                info!(order_id = %order.id, total = %order.total, "Order created");
                Ok(order)
            }
            Err(e) => {
                self.release_items(&items).await;
                Err(e.into())
            }
        }
    }

    async fn reserve_line(&self, line: &OrderLine) -> Result<OrderItem, OrderError> {
        let product = match self.product_client.get_product(line.product_id.clone()).await {
            Ok(Some(product)) if product.active => product,
            Ok(_) => {
                error!(product_id = %line.product_id, "Product not available");
                return Err(OrderError::InvalidProduct(line.product_id.clone()));
            }
            Err(e) => {
                error!(error = %e, "Product validation failed");
                return Err(OrderError::InvalidProduct(format!("Product validation failed: {e}")));
            }
        };

        self.product_client
            .reserve_stock(product.id.clone(), line.quantity)
            .await
            .map_err(|e| match e {
                ProductError::InsufficientStock { .. } => OrderError::InsufficientStock(e.to_string()),
                other => OrderError::ActorCommunicationError(other.to_string()),
            })?;

        Ok(OrderItem {
            product_id: product.id,
            design_id: line.design_id.clone(),
            size: line.size,
            quantity: line.quantity,
            unit_price: product.price,
        })
    }

    async fn release_items(&self, items: &[OrderItem]) {
        for item in items {
            if let Err(e) = self.product_client.release_stock(item.product_id.clone(), item.quantity).await {
                warn!(product_id = %item.product_id, error = %e, "Stock release failed");
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<_> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(orders)
    }

    /// Confirms a gateway payment for the buyer's own order.
    ///
    /// Royalty crediting and the confirmation email run after the order is
    /// marked paid; their failures are logged and do not undo the payment.
    #[instrument(skip(self, signature))]
    pub async fn verify_payment(
        &self,
        order_id: String,
        user_id: String,
        payment_id: String,
        signature: String,
    ) -> Result<Order, OrderError> {
        let order = self.require_order(order_id.clone()).await?;
        if order.user_id != user_id {
            return Err(OrderError::Forbidden);
        }
        if !self.verifier.verify(&order_id, &payment_id, &signature) {
            warn!("Payment signature rejected");
            return Err(OrderError::InvalidSignature);
        }

        let order = self
            .inner
            .perform_action(order_id, OrderAction::MarkPaid { payment_id })
            .await?;
        info!(order_id = %order.id, "Order paid");

        let report = self.ledger.credit_order(&order).await;
        info!(credits = report.credits.len(), skipped = report.skipped.len(), "Royalties processed");

        match self.user_client.get_user(order.user_id.clone()).await {
            Ok(Some(buyer)) => {
                self.notifier
                    .notify(Notification {
                        to_email: buyer.email,
                        to_name: buyer.name,
                        kind: EmailKind::OrderPaid { order_id: order.id.clone(), total: order.total },
                    })
                    .await;
            }
            Ok(None) => warn!(user_id = %order.user_id, "Buyer vanished; no confirmation email"),
            Err(e) => warn!(error = %e, "Buyer lookup failed; no confirmation email"),
        }
        Ok(order)
    }

    /// Cancels an unpaid order and returns its stock.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: String, user_id: String) -> Result<Order, OrderError> {
        let order = self.require_order(order_id.clone()).await?;
        if order.user_id != user_id {
            return Err(OrderError::Forbidden);
        }
        let order = self.inner.perform_action(order_id, OrderAction::Cancel).await?;
        self.release_items(&order.items).await;
        info!(order_id = %order.id, "Order cancelled");
        Ok(order)
    }
}

