use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Role, User, UserCreate, UserPatch};
use crate::user_actor::{UserAction, UserError};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    admin_emails: Arc<HashSet<String>>,
}

impl_client_methods!(UserClient, User, UserError, user);

impl UserClient {
    /// `admin_emails` lists the addresses that register with the admin role.
    pub fn new(inner: ResourceClient<User>, admin_emails: impl IntoIterator<Item = String>) -> Self {
        let admin_emails = admin_emails
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .collect();
        Self { inner, admin_emails: Arc::new(admin_emails) }
    }

    #[instrument(skip(self))]
    pub async fn register_user(&self, name: String, email: String) -> Result<User, UserError> {
        debug!("Sending request");
        let email = email.trim().to_lowercase();
        if self.find_user_by_email(&email).await?.is_some() {
            return Err(UserError::AlreadyExists(email));
        }
        let role = if self.admin_emails.contains(&email) { Role::Admin } else { Role::Customer };
        let user = self
            .inner
            .create(UserCreate { name, email, role })
            .await
            .map_err(UserError::from)?;
        info!(user_id = %user.id, role = ?user.role, "User registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let email = email.trim().to_lowercase();
        let users = self.inner.list().await.map_err(UserError::from)?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        if let Some(email) = &patch.email {
            if let Some(existing) = self.find_user_by_email(email).await? {
                if existing.id != id {
                    return Err(UserError::AlreadyExists(existing.email));
                }
            }
        }
        self.inner.update(id, patch).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn credit_royalty(&self, id: String, amount: Decimal) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, UserAction::CreditRoyalty(amount))
            .await
            .map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn debit_points(&self, id: String, amount: Decimal) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, UserAction::DebitPoints(amount))
            .await
            .map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn restore_points(&self, id: String, amount: Decimal) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, UserAction::RestorePoints(amount))
            .await
            .map_err(UserError::from)
    }
}
