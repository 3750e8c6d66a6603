//! Shared test helpers: fake collaborators and page builders.
#![allow(dead_code)]

use async_trait::async_trait;
use auction_hunter::application::extract::SALES_SCRIPT_INDEX;
use auction_hunter::application::hunt::HuntSettings;
use auction_hunter::domain::entities::transaction::TransactionRecord;
use auction_hunter::domain::entities::watch_target::WatchTarget;
use auction_hunter::domain::error::{CycleError, DomainError};
use auction_hunter::domain::ports::notifier::{Notification, Notifier};
use auction_hunter::domain::ports::operator_prompt::OperatorPrompt;
use auction_hunter::domain::ports::page_fetcher::PageFetcher;
use auction_hunter::domain::ports::sleeper::Sleeper;
use auction_hunter::domain::values::hunt_mode::HuntMode;
use auction_hunter::HuntPorts;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ITEM_URL: &str = "https://www.ffxiah.com/item/4096/fire-crystal";
pub const PLAYER_URL: &str = "https://www.ffxiah.com/player/asura/bob";

pub fn item_target(mode: HuntMode) -> WatchTarget {
    WatchTarget::from_url(ITEM_URL, mode).unwrap()
}

pub fn player_target() -> WatchTarget {
    WatchTarget::from_url(PLAYER_URL, HuntMode::Player).unwrap()
}

pub fn minutes(m: u64) -> Duration {
    Duration::from_secs(m * 60)
}

pub fn settings(poll_minutes: u64) -> HuntSettings {
    HuntSettings::from_minutes(poll_minutes).unwrap()
}

/// A listing page whose stock counter reads `text`.
pub fn stock_page(text: &str) -> String {
    format!(
        r#"<html><body><div class="listing"><span class="label">Stock:</span> <span class="stock">{text}</span></div></body></html>"#
    )
}

/// A page whose data script (the eighth) contains `body`.
pub fn sales_page(body: &str) -> String {
    let mut page = String::from("<html><head>");
    for i in 0..SALES_SCRIPT_INDEX {
        page.push_str(&format!("<script type=\"text/javascript\">var filler{i} = {i};</script>\n"));
    }
    page.push_str(&format!("<script>{body}</script>\n"));
    page.push_str("<script>var trailing = true;</script></head><body></body></html>");
    page
}

pub fn sale(item: &str, seller: &str, saleon: i64, price: u64) -> serde_json::Value {
    serde_json::json!({
        "en_name": item,
        "seller_name": seller,
        "buyer_name": "someone",
        "saleon": saleon,
        "price": price,
    })
}

/// A page carrying `sales` as the given feed, followed by unrelated script.
pub fn feed_page(marker: &str, sales: &[serde_json::Value]) -> String {
    let json = serde_json::to_string(sales).unwrap();
    sales_page(&format!("var x = 1; {marker} = {json}; Other.stuff = [{{\"a\": 1}}];"))
}

pub fn record(item: &str, seller: &str, saleon: i64, price: u64) -> TransactionRecord {
    TransactionRecord {
        item_name: Some(item.into()),
        seller_name: Some(seller.into()),
        sale_timestamp: Some(saleon),
        sale_price: Some(price),
    }
}

/// Serves pages in order; runs dry with a transport error.
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<VecDeque<Result<String, CycleError>>>,
    calls: Mutex<usize>,
}

impl FakeFetcher {
    pub fn new(pages: Vec<Result<String, CycleError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, _target: &WatchTarget) -> Result<String, CycleError> {
        *self.calls.lock().unwrap() += 1;
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CycleError::Transport("no more pages".into())))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|n| n.message.clone()).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(DomainError::Notification("mail server down".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Answers questions from a script; errors once it runs out.
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    pub questions: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl OperatorPrompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> Result<String, DomainError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DomainError::Prompt(format!("no answer for: {question}")))
    }
}

pub struct Fakes {
    pub fetcher: Arc<FakeFetcher>,
    pub notifier: Arc<RecordingNotifier>,
    pub sleeper: Arc<RecordingSleeper>,
}

impl Fakes {
    pub fn new(pages: Vec<Result<String, CycleError>>) -> Self {
        Self::with_notifier(pages, RecordingNotifier::default())
    }

    pub fn with_notifier(pages: Vec<Result<String, CycleError>>, notifier: RecordingNotifier) -> Self {
        Self {
            fetcher: Arc::new(FakeFetcher::new(pages)),
            notifier: Arc::new(notifier),
            sleeper: Arc::new(RecordingSleeper::default()),
        }
    }

    pub fn ports(&self) -> HuntPorts {
        HuntPorts {
            fetcher: self.fetcher.clone(),
            notifier: self.notifier.clone(),
            sleeper: self.sleeper.clone(),
        }
    }
}
