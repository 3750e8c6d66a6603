//! Inventory mode: waits for the stock counter to hit a target.

use tracing::info;

use crate::domain::entities::poll_state::PollState;
use crate::domain::error::CycleError;
use crate::domain::ports::evaluator::Evaluator;
use crate::domain::values::decision::Decision;
use crate::domain::values::extracted::{ExtractShape, ExtractedValue};
use crate::domain::values::threshold::InventoryTarget;

pub struct InventoryEvaluator {
    label: String,
    goal: InventoryTarget,
}

impl InventoryEvaluator {
    pub fn new(label: String, goal: InventoryTarget) -> Self {
        Self { label, goal }
    }

    pub fn is_met(&self, stock: u64) -> bool {
        match self.goal {
            InventoryTarget::Empty => stock == 0,
            InventoryTarget::Stocked => stock != 0,
            InventoryTarget::Range { lower, upper } => (lower..=upper).contains(&stock),
        }
    }

    fn describe_goal(&self) -> String {
        match self.goal {
            InventoryTarget::Empty => format!("empty {}", self.label),
            InventoryTarget::Stocked => format!("stocked {}", self.label),
            InventoryTarget::Range { lower, upper } => {
                format!("{} within range ({lower} - {upper})", self.label)
            }
        }
    }
}

/// `There are 0 fire-crystal up for sale`
pub fn stock_message(stock: u64, label: &str) -> String {
    let verb = if stock == 1 { "is" } else { "are" };
    format!("There {verb} {stock} {label} up for sale")
}

impl Evaluator for InventoryEvaluator {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn shape(&self) -> ExtractShape {
        ExtractShape::StockCount
    }

    fn evaluate(&self, value: &ExtractedValue, state: &mut PollState) -> Decision {
        let &ExtractedValue::Integer(stock) = value else {
            return Decision::Failure(CycleError::ShapeMismatch {
                expected: "integer",
                found: value.shape_name(),
            });
        };

        info!(attempt = state.attempt_count, "#{} check for {}", state.attempt_count, self.describe_goal());

        if self.is_met(stock) {
            info!(stock, "Found {stock} {}!", self.label);
            Decision::completed(stock_message(stock, &self.label))
        } else {
            info!(stock, "Found {stock} {}", self.label);
            Decision::ContinueSearching
        }
    }
}
