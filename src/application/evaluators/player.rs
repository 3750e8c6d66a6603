//! Player mode: fires when a watched seller makes a new sale.
//!
//! The first sighting of the seller's latest sale only sets the session
//! watermark. Any strictly newer sale moves the watermark forward, whether or
//! not it matches the item filter, so an older matching sale can never fire
//! after a newer one has been seen.

use tracing::{debug, info};

use crate::domain::entities::poll_state::PollState;
use crate::domain::error::CycleError;
use crate::domain::ports::evaluator::Evaluator;
use crate::domain::values::decision::Decision;
use crate::domain::values::extracted::{ExtractShape, ExtractedValue, SalesFeed};

pub struct PlayerEvaluator {
    seller: String,
    specific_item_name: Option<String>,
}

impl PlayerEvaluator {
    pub fn new(seller: String, specific_item_name: Option<String>) -> Self {
        Self {
            seller,
            specific_item_name,
        }
    }

    fn item_matches(&self, item_name: &str) -> bool {
        self.specific_item_name
            .as_deref()
            .map_or(true, |wanted| wanted == item_name)
    }
}

/// `Bob sold a Fire Crystal`
pub fn sale_message(seller: &str, item_name: &str) -> String {
    format!("{} sold a {item_name}", capitalize(seller))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

impl Evaluator for PlayerEvaluator {
    fn name(&self) -> &'static str {
        "player"
    }

    fn shape(&self) -> ExtractShape {
        ExtractShape::Transactions(SalesFeed::Player)
    }

    fn evaluate(&self, value: &ExtractedValue, state: &mut PollState) -> Decision {
        let ExtractedValue::Transactions(sales) = value else {
            return Decision::Failure(CycleError::ShapeMismatch {
                expected: "transaction list",
                found: value.shape_name(),
            });
        };
        let Some(latest) = sales.iter().find(|sale| sale.is_sold_by(&self.seller)) else {
            return Decision::Failure(CycleError::SellerNotFound(self.seller.clone()));
        };
        let (Some(sold_at), Some(item_name)) = (latest.sale_timestamp, latest.item_name.as_deref())
        else {
            let missing = if latest.sale_timestamp.is_none() { "sale time" } else { "item name" };
            return Decision::Failure(CycleError::IncompleteRecord(missing.into()));
        };

        match &self.specific_item_name {
            Some(item) => info!(
                attempt = state.attempt_count,
                "#{} check for {} {item} sales",
                state.attempt_count,
                self.seller
            ),
            None => info!(
                attempt = state.attempt_count,
                "#{} check for {} sales",
                state.attempt_count,
                self.seller
            ),
        }

        let Some(watermark) = state.last_seen_sale_timestamp else {
            debug!(
                sold_at = ?latest.sold_at(),
                "First sighting of {} sales, setting watermark",
                self.seller
            );
            state.last_seen_sale_timestamp = Some(sold_at);
            info!("No new sales for {}", self.seller);
            return Decision::ContinueSearching;
        };

        if sold_at <= watermark {
            info!("No new sales for {}", self.seller);
            return Decision::ContinueSearching;
        }

        state.last_seen_sale_timestamp = Some(sold_at);
        if self.item_matches(item_name) {
            let message = sale_message(&self.seller, item_name);
            info!(sold_at, "{message}");
            Decision::completed(message)
        } else {
            info!(sold_at, item = item_name, "{} sold something else", self.seller);
            Decision::ContinueSearching
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bOB"), "Bob");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_sale_message() {
        assert_eq!(sale_message("alice", "Fire Crystal"), "Alice sold a Fire Crystal");
    }
}
