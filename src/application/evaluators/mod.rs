pub mod inventory;
pub mod player;
pub mod price;

use crate::domain::entities::watch_target::WatchTarget;
use crate::domain::error::DomainError;
use crate::domain::ports::evaluator::Evaluator;
use crate::domain::values::threshold::ThresholdConfig;

use self::inventory::InventoryEvaluator;
use self::player::PlayerEvaluator;
use self::price::PriceEvaluator;

/// Picks the evaluator for a session. Called once, before polling starts.
pub fn evaluator_for(
    target: &WatchTarget,
    config: &ThresholdConfig,
) -> Result<Box<dyn Evaluator>, DomainError> {
    config.validate()?;
    if config.mode() != target.mode() {
        return Err(DomainError::InvalidConfig(format!(
            "{} threshold given for a {} watch",
            config.mode(),
            target.mode()
        )));
    }

    let label = target.label().to_string();
    Ok(match config {
        ThresholdConfig::Inventory(goal) => Box::new(InventoryEvaluator::new(label, *goal)),
        ThresholdConfig::Price {
            target_price,
            comparison,
        } => Box::new(PriceEvaluator::new(label, *target_price, *comparison)),
        ThresholdConfig::Player { specific_item_name } => {
            Box::new(PlayerEvaluator::new(label, specific_item_name.clone()))
        }
    })
}
