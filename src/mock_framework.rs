//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to play the
//! actor's side of the conversation.

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use crate::domain::{Product, Role, User};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls, so each reply (success,
/// failure, or none at all) is decided by the test.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>, T::Error>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

// Fixtures for replies.

pub fn user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: "Test User".to_string(),
        email: email.to_string(),
        role: Role::Customer,
        royalty_points: Decimal::ZERO,
        total_earnings: Decimal::ZERO,
        created_at: Utc::now(),
    }
}

pub fn product(id: &str, price: Decimal, stock: u32) -> Product {
    Product {
        id: id.to_string(),
        name: "Test Tee".to_string(),
        description: String::new(),
        price,
        stock,
        active: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserCreate;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            let payload = UserCreate {
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
                role: Role::Customer,
            };
            client.create(payload).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        responder.send(Ok(user("usr_1", "test@example.com"))).unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result.id, "usr_1");
    }
}
