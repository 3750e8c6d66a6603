use crate::domain::ports::sleeper::Sleeper;
use async_trait::async_trait;
use std::time::Duration;

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
