//! Price mode: compares the most recent sale price against a target.

use tracing::info;

use crate::domain::entities::poll_state::PollState;
use crate::domain::error::CycleError;
use crate::domain::ports::evaluator::Evaluator;
use crate::domain::values::decision::Decision;
use crate::domain::values::extracted::{ExtractShape, ExtractedValue, SalesFeed};
use crate::domain::values::threshold::PriceComparison;

pub struct PriceEvaluator {
    label: String,
    target_price: u64,
    comparison: PriceComparison,
}

impl PriceEvaluator {
    pub fn new(label: String, target_price: u64, comparison: PriceComparison) -> Self {
        Self {
            label,
            target_price,
            comparison,
        }
    }
}

impl Evaluator for PriceEvaluator {
    fn name(&self) -> &'static str {
        "price"
    }

    fn shape(&self) -> ExtractShape {
        ExtractShape::Transactions(SalesFeed::Item)
    }

    fn evaluate(&self, value: &ExtractedValue, state: &mut PollState) -> Decision {
        let ExtractedValue::Transactions(sales) = value else {
            return Decision::Failure(CycleError::ShapeMismatch {
                expected: "transaction list",
                found: value.shape_name(),
            });
        };
        let Some(last_price) = sales.first().and_then(|sale| sale.sale_price) else {
            return Decision::Failure(CycleError::MissingPrice);
        };

        info!(
            attempt = state.attempt_count,
            "#{} check for {} price {} {}",
            state.attempt_count,
            self.label,
            self.comparison,
            self.target_price
        );

        let message = format!("Last {} sale was {last_price}", self.label);
        if self.comparison.matches(last_price, self.target_price) {
            info!(last_price, "{message}!");
            Decision::completed(message)
        } else {
            info!(last_price, "{message}");
            Decision::ContinueSearching
        }
    }
}
