use crate::domain::entities::watch_target::WatchTarget;
use crate::domain::error::CycleError;
use async_trait::async_trait;

/// Retrieves the raw markup of a watched listing.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Connection problems come back as [`CycleError::Transport`].
    async fn fetch(&self, target: &WatchTarget) -> Result<String, CycleError>;
}
