use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::UserClient;
use crate::domain::{Withdrawal, WithdrawalCreate};
use crate::notify::{EmailKind, Notification, Notifier};
use crate::user_actor::UserError;
use crate::withdrawal_actor::{WithdrawalAction, WithdrawalError};

/// Client for royalty payouts. Points are debited when the request is made
/// and handed back if an admin rejects it.
#[derive(Clone)]
pub struct WithdrawalClient {
    inner: ResourceClient<Withdrawal>,
    user_client: UserClient,
    notifier: Notifier,
    min_amount: Decimal,
}

impl_client_methods!(WithdrawalClient, Withdrawal, WithdrawalError, withdrawal);

impl WithdrawalClient {
    pub fn new(
        inner: ResourceClient<Withdrawal>,
        user_client: UserClient,
        notifier: Notifier,
        min_amount: Decimal,
    ) -> Self {
        Self { inner, user_client, notifier, min_amount }
    }

    #[instrument(skip(self))]
    pub async fn request_withdrawal(
        &self,
        user_id: String,
        amount: Decimal,
        payout_destination: String,
    ) -> Result<Withdrawal, WithdrawalError> {
        if amount < self.min_amount {
            return Err(WithdrawalError::BelowMinimum(self.min_amount));
        }
        if payout_destination.trim().is_empty() {
            return Err(WithdrawalError::ValidationError(
                "payout destination is required".to_string(),
            ));
        }

        self.user_client
            .debit_points(user_id.clone(), amount)
            .await
            .map_err(|e| match e {
                UserError::NotFound(id) => WithdrawalError::InvalidUser(id),
                UserError::InsufficientBalance { requested, available } => {
                    WithdrawalError::InsufficientBalance { requested, available }
                }
                other => WithdrawalError::ActorCommunicationError(other.to_string()),
            })?;

        let created = self
            .inner
            .create(WithdrawalCreate { user_id: user_id.clone(), amount, payout_destination })
            .await;
        match created {
            Ok(withdrawal) => {
                info!(withdrawal_id = %withdrawal.id, %amount, "Withdrawal requested");
                Ok(withdrawal)
            }
            Err(e) => {
                self.restore(&user_id, amount).await;
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list_withdrawals_for(&self, user_id: String) -> Result<Vec<Withdrawal>, WithdrawalError> {
        let mut withdrawals: Vec<_> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|w| w.user_id == user_id)
            .collect();
        withdrawals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(withdrawals)
    }

    /// Approves or rejects a pending withdrawal. Rejection re-credits the points.
    #[instrument(skip(self))]
    pub async fn review_withdrawal(
        &self,
        id: String,
        approve: bool,
        note: Option<String>,
    ) -> Result<Withdrawal, WithdrawalError> {
        let action = if approve {
            WithdrawalAction::Approve { note }
        } else {
            WithdrawalAction::Reject { note }
        };
        let withdrawal = self.inner.perform_action(id, action).await?;
        if !approve {
            self.restore(&withdrawal.user_id, withdrawal.amount).await;
        }
        info!(withdrawal_id = %withdrawal.id, status = ?withdrawal.status, "Withdrawal reviewed");

        match self.user_client.get_user(withdrawal.user_id.clone()).await {
            Ok(Some(user)) => {
                self.notifier
                    .notify(Notification {
                        to_email: user.email,
                        to_name: user.name,
                        kind: EmailKind::WithdrawalReviewed {
                            withdrawal_id: withdrawal.id.clone(),
                            amount: withdrawal.amount,
                            approved: approve,
                        },
                    })
                    .await;
            }
            Ok(None) => warn!(user_id = %withdrawal.user_id, "Requester vanished; no email"),
            Err(e) => warn!(error = %e, "Requester lookup failed; no email"),
        }
        Ok(withdrawal)
    }

    async fn restore(&self, user_id: &str, amount: Decimal) {
        if let Err(e) = self.user_client.restore_points(user_id.to_string(), amount).await {
            warn!(%user_id, %amount, error = %e, "Royalty points not restored");
        }
    }
}
