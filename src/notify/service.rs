use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use super::{render, Notification, OutboundEmail};

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Seam to the transactional email provider.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Writes emails to the log instead of a provider.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        info!(to = %email.to, subject = %email.subject, "Email dispatched");
        Ok(())
    }
}

#[derive(Debug)]
pub enum NotifierRequest {
    Send(Notification),
    /// Answers once every earlier message has been processed.
    Flush { respond_to: oneshot::Sender<()> },
}

pub struct NotificationService {
    receiver: mpsc::Receiver<NotifierRequest>,
    mailer: Arc<dyn Mailer>,
}

impl NotificationService {
    pub fn new(buffer_size: usize, mailer: Arc<dyn Mailer>) -> (Self, Notifier) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, mailer }, Notifier { sender })
    }

    #[instrument(name = "notification_service", skip(self))]
    pub async fn run(mut self) {
        info!("NotificationService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                NotifierRequest::Send(notification) => {
                    let email = render(&notification);
                    if let Err(e) = self.mailer.send(&email).await {
                        warn!(error = %e, to = %email.to, subject = %email.subject, "Email not delivered");
                    }
                }
                NotifierRequest::Flush { respond_to } => {
                    let _ = respond_to.send(());
                }
            }
        }
        info!("NotificationService stopped");
    }
}

/// Fire-and-forget handle to the notification actor.
#[derive(Clone)]
pub struct Notifier {
    sender: mpsc::Sender<NotifierRequest>,
}

impl Notifier {
    pub async fn notify(&self, notification: Notification) {
        debug!(to = %notification.to_email, "Queueing notification");
        if self.sender.send(NotifierRequest::Send(notification)).await.is_err() {
            warn!("Notification actor closed; email dropped");
        }
    }

    /// Waits until everything queued so far has been handed to the mailer.
    pub async fn flush(&self) {
        let (respond_to, response) = oneshot::channel();
        if self.sender.send(NotifierRequest::Flush { respond_to }).await.is_ok() {
            let _ = response.await;
        }
    }
}

/// Keeps every email in memory for assertions.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingMailer {
    sent: Arc<std::sync::Mutex<Vec<OutboundEmail>>>,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        self.sent
            .lock()
            .map_err(|e| MailError(e.to_string()))?
            .push(email.clone());
        Ok(())
    }
}
