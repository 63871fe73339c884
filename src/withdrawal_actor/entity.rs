use chrono::Utc;
use rust_decimal::Decimal;

use super::WithdrawalError;
use crate::actor_framework::Entity;
use crate::domain::{Withdrawal, WithdrawalCreate, WithdrawalStatus};

#[derive(Debug, Clone)]
pub enum WithdrawalAction {
    Approve { note: Option<String> },
    Reject { note: Option<String> },
}

impl Entity for Withdrawal {
    type Id = String;
    type CreatePayload = WithdrawalCreate;
    type Patch = ();
    type Action = WithdrawalAction;
    type ActionResult = Withdrawal;
    type Error = WithdrawalError;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, params: WithdrawalCreate) -> Result<Self, WithdrawalError> {
        if params.amount <= Decimal::ZERO {
            return Err(WithdrawalError::ValidationError("amount must be positive".to_string()));
        }
        if params.payout_destination.trim().is_empty() {
            return Err(WithdrawalError::ValidationError(
                "payout destination is required".to_string(),
            ));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            amount: params.amount,
            payout_destination: params.payout_destination.trim().to_string(),
            status: WithdrawalStatus::Pending,
            note: None,
            created_at: Utc::now(),
            reviewed_at: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), WithdrawalError> {
        Ok(())
    }

    fn handle_action(&mut self, action: WithdrawalAction) -> Result<Withdrawal, WithdrawalError> {
        if self.status != WithdrawalStatus::Pending {
            return Err(WithdrawalError::AlreadyReviewed(self.status));
        }
        let (status, note) = match action {
            WithdrawalAction::Approve { note } => (WithdrawalStatus::Approved, note),
            WithdrawalAction::Reject { note } => (WithdrawalStatus::Rejected, note),
        };
        self.status = status;
        self.note = note;
        self.reviewed_at = Some(Utc::now());
        Ok(self.clone())
    }
}
