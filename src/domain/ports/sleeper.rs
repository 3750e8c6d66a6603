use async_trait::async_trait;
use std::time::Duration;

/// The only suspension point of the poll loop.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
