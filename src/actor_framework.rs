use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Domain error returned by constructors, hooks and actions.
    type Error: Clone + Send + Sync + Debug + Display + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Failures surfaced by [`ResourceClient`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    name: &'static str,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        name: &'static str,
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            name,
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", fields(resource = self.name), skip(self))]
    pub async fn run(mut self) {
        debug!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => {
                            // Work on a copy so a rejected patch leaves the stored item untouched.
                            let mut updated = item.clone();
                            match updated.on_update(patch) {
                                Ok(()) => {
                                    *item = updated.clone();
                                    Ok(updated)
                                }
                                Err(e) => Err(FrameworkError::Entity(e)),
                            }
                        }
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = match self.store.get(&id) {
                        Some(item) => match item.on_delete() {
                            Ok(()) => {
                                self.store.remove(&id);
                                Ok(())
                            }
                            Err(e) => Err(FrameworkError::Entity(e)),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => {
                            let mut updated = item.clone();
                            match updated.handle_action(action) {
                                Ok(outcome) => {
                                    *item = updated;
                                    Ok(outcome)
                                }
                                Err(e) => Err(FrameworkError::Entity(e)),
                            }
                        }
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        debug!("Actor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id, item.clone());
        Ok(item)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derived Clone would require `T: Clone` bounds on every associated type.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        label: String,
        value: u32,
        locked: bool,
    }

    #[derive(Debug)]
    struct CounterCreate {
        label: String,
    }

    #[derive(Debug)]
    struct CounterPatch {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(u32),
        Lock,
    }

    impl Entity for Counter {
        type Id = String;
        type CreatePayload = CounterCreate;
        type Patch = CounterPatch;
        type Action = CounterAction;
        type ActionResult = u32;
        type Error = String;

        fn id(&self) -> &String { &self.id }

        fn from_create(id: String, payload: CounterCreate) -> Result<Self, String> {
            if payload.label.is_empty() {
                return Err("label required".to_string());
            }
            Ok(Self { id, label: payload.label, value: 0, locked: false })
        }

        fn on_update(&mut self, patch: CounterPatch) -> Result<(), String> {
            if let Some(label) = patch.label {
                self.label = label;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), String> {
            if self.locked {
                return Err("locked".to_string());
            }
            Ok(())
        }

        fn handle_action(&mut self, action: CounterAction) -> Result<u32, String> {
            match action {
                CounterAction::Add(n) => {
                    // Mutate first, then fail: the actor must discard the partial change.
                    self.value += n;
                    if self.locked {
                        return Err("locked".to_string());
                    }
                    Ok(self.value)
                }
                CounterAction::Lock => {
                    self.locked = true;
                    Ok(self.value)
                }
            }
        }
    }

    fn spawn_counter_actor() -> ResourceClient<Counter> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("ctr_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new("counter", 10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_counter_actor();

        let created = client.create(CounterCreate { label: "a".into() }).await.unwrap();
        assert_eq!(created.id, "ctr_1");

        let value = client.perform_action(created.id.clone(), CounterAction::Add(3)).await.unwrap();
        assert_eq!(value, 3);

        client.perform_action(created.id.clone(), CounterAction::Lock).await.unwrap();
        let err = client.perform_action(created.id.clone(), CounterAction::Add(2)).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity("locked".to_string()));

        let stored = client.get(created.id.clone()).await.unwrap().unwrap();
        assert_eq!(stored.value, 3);
    }

    #[tokio::test]
    async fn test_create_validation_and_missing_items() {
        let client = spawn_counter_actor();

        let err = client.create(CounterCreate { label: String::new() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity("label required".to_string()));

        let err = client.delete("ctr_99".to_string()).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("ctr_99".to_string()));
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_guarded_delete() {
        let client = spawn_counter_actor();
        let created = client.create(CounterCreate { label: "a".into() }).await.unwrap();

        let updated = client
            .update(created.id.clone(), CounterPatch { label: Some("b".into()) })
            .await
            .unwrap();
        assert_eq!(updated.label, "b");

        client.perform_action(created.id.clone(), CounterAction::Lock).await.unwrap();
        assert!(client.delete(created.id.clone()).await.is_err());
        assert_eq!(client.list().await.unwrap().len(), 1);
    }
}
