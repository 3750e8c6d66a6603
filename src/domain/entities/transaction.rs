use chrono::{DateTime, Utc};
use serde::Serialize;

/// One sale event from an embedded sales feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    pub item_name: Option<String>,
    pub seller_name: Option<String>,
    /// Unix seconds.
    pub sale_timestamp: Option<i64>,
    pub sale_price: Option<u64>,
}

impl TransactionRecord {
    pub fn sold_at(&self) -> Option<DateTime<Utc>> {
        self.sale_timestamp
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
    }

    pub fn is_sold_by(&self, seller: &str) -> bool {
        self.seller_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == seller.to_lowercase())
    }
}
