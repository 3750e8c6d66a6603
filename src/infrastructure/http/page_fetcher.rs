use crate::domain::entities::watch_target::WatchTarget;
use crate::domain::error::CycleError;
use crate::domain::ports::page_fetcher::PageFetcher;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use std::time::Duration;

/// The listing site serves its full page only to browser-like agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_1) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/39.0.2171.95 Safari/537.36";

/// Fetches listing pages for one server, selected by the `sid` cookie.
pub struct HttpPageFetcher {
    server_id: String,
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            client: reqwest::Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, target: &WatchTarget) -> Result<String, CycleError> {
        let resp = self
            .client
            .get(target.base_url())
            .query(target.params())
            .header(COOKIE, format!("sid={}", self.server_id))
            .send()
            .await
            .map_err(|e| CycleError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CycleError::Transport(format!(
                "{} returned {}",
                target.base_url(),
                resp.status()
            )));
        }

        resp.text()
            .await
            .map_err(|e| CycleError::Transport(e.to_string()))
    }
}
