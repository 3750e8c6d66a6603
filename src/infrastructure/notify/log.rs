use crate::domain::error::DomainError;
use crate::domain::ports::notifier::{Notification, Notifier};
use async_trait::async_trait;

/// Writes the notification to the log instead of sending it anywhere.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        tracing::info!(
            label = %notification.label,
            url = %notification.url,
            "{}",
            notification.message
        );
        Ok(())
    }
}
