use chrono::Utc;
use rust_decimal::Decimal;

use super::{UserAction, UserError};
use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

fn validate_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::ValidationError(format!("invalid email: {email}"))),
    }
}

fn validate_amount(amount: Decimal) -> Result<(), UserError> {
    if amount <= Decimal::ZERO {
        return Err(UserError::ValidationError("amount must be positive".to_string()));
    }
    Ok(())
}

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = User;
    type Error = UserError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new User with zeroed royalty balances.
    fn from_create(id: String, params: UserCreate) -> Result<Self, UserError> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(UserError::ValidationError("name is required".to_string()));
        }
        let email = params.email.trim().to_lowercase();
        validate_email(&email)?;
        Ok(Self {
            id,
            name,
            email,
            role: params.role,
            royalty_points: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
            created_at: Utc::now(),
        })
    }

    /// Updates the user's profile information.
    ///
    /// # Fields Updated
    /// - `name`: User's display name
    /// - `email`: User's email address
    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(UserError::ValidationError("name is required".to_string()));
            }
            self.name = name;
        }
        if let Some(email) = patch.email {
            let email = email.trim().to_lowercase();
            validate_email(&email)?;
            self.email = email;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<User, UserError> {
        match action {
            UserAction::CreditRoyalty(amount) => {
                validate_amount(amount)?;
                self.royalty_points += amount;
                self.total_earnings += amount;
            }
            UserAction::DebitPoints(amount) => {
                validate_amount(amount)?;
                if amount > self.royalty_points {
                    return Err(UserError::InsufficientBalance {
                        requested: amount,
                        available: self.royalty_points,
                    });
                }
                self.royalty_points -= amount;
            }
            UserAction::RestorePoints(amount) => {
                validate_amount(amount)?;
                self.royalty_points += amount;
            }
        }
        Ok(self.clone())
    }
}
