use crate::domain::entities::watch_target::WatchTarget;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use serde::Serialize;

/// A completed watch, ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub label: String,
    pub url: String,
    pub message: String,
}

impl Notification {
    pub fn for_target(target: &WatchTarget, message: impl Into<String>) -> Self {
        Self {
            label: target.label().to_string(),
            url: target.url().to_string(),
            message: message.into(),
        }
    }
}

/// Outbound notification channel. Delivery failures are reported, never retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn notify(&self, notification: &Notification) -> Result<(), DomainError>;
}
