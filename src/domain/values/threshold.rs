//! Mode-specific decision parameters.
//!
//! A [`ThresholdConfig`] is built once from operator input, validated, and
//! never mutated while a watch session runs.

use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::values::hunt_mode::HuntMode;

/// What stock level the Inventory mode is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryTarget {
    /// Nothing left on the market.
    Empty,
    /// At least one listed.
    Stocked,
    /// Stock within `lower..=upper`.
    Range { lower: u64, upper: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceComparison {
    GreaterOrEqual,
    LessOrEqual,
}

impl PriceComparison {
    pub fn matches(&self, price: u64, target: u64) -> bool {
        match self {
            PriceComparison::GreaterOrEqual => price >= target,
            PriceComparison::LessOrEqual => price <= target,
        }
    }
}

impl fmt::Display for PriceComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceComparison::GreaterOrEqual => write!(f, "at or above"),
            PriceComparison::LessOrEqual => write!(f, "at or below"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdConfig {
    Inventory(InventoryTarget),
    Price {
        target_price: u64,
        comparison: PriceComparison,
    },
    Player {
        /// `None` means any item sold by the seller.
        specific_item_name: Option<String>,
    },
}

impl ThresholdConfig {
    pub fn empty() -> Self {
        ThresholdConfig::Inventory(InventoryTarget::Empty)
    }

    pub fn stocked() -> Self {
        ThresholdConfig::Inventory(InventoryTarget::Stocked)
    }

    /// Inclusive stock range. Rejects `lower > upper`.
    pub fn range(lower: u64, upper: u64) -> Result<Self, DomainError> {
        let config = ThresholdConfig::Inventory(InventoryTarget::Range { lower, upper });
        config.validate()?;
        Ok(config)
    }

    pub fn price(target_price: u64, comparison: PriceComparison) -> Self {
        ThresholdConfig::Price {
            target_price,
            comparison,
        }
    }

    pub fn player(specific_item_name: Option<String>) -> Self {
        let specific_item_name = specific_item_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        ThresholdConfig::Player { specific_item_name }
    }

    pub fn mode(&self) -> HuntMode {
        match self {
            ThresholdConfig::Inventory(_) => HuntMode::Inventory,
            ThresholdConfig::Price { .. } => HuntMode::Price,
            ThresholdConfig::Player { .. } => HuntMode::Player,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let ThresholdConfig::Inventory(InventoryTarget::Range { lower, upper }) = self {
            if lower > upper {
                return Err(DomainError::InvalidConfig(format!(
                    "Range lower bound {lower} is greater than upper bound {upper}"
                )));
            }
        }
        Ok(())
    }
}
