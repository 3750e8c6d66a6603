//! Turns hunt arguments into a target and threshold, asking for anything missing.

use crate::cli::commands::HuntArgs;
use crate::domain::entities::watch_target::{ListingUrl, WatchTarget};
use crate::domain::error::DomainError;
use crate::domain::ports::operator_prompt::OperatorPrompt;
use crate::domain::values::hunt_mode::HuntMode;
use crate::domain::values::threshold::{PriceComparison, ThresholdConfig};

pub fn watch_target(args: &HuntArgs, prompt: &dyn OperatorPrompt) -> Result<WatchTarget, DomainError> {
    let listing = ListingUrl::parse(&args.url)?;
    if listing.is_player_page() {
        return WatchTarget::new(listing, HuntMode::Player);
    }

    let mode = match &args.mode {
        Some(mode) => mode.parse::<HuntMode>().map_err(DomainError::InvalidConfig)?,
        None if args.empty || args.stocked || args.range.is_some() => HuntMode::Inventory,
        None if args.price.is_some() || args.above || args.below => HuntMode::Price,
        None => prompt
            .choose(
                "Would you like to hunt based on inventory or price? Type inventory or price and press enter.",
                &["inventory", "price"],
            )?
            .parse::<HuntMode>()
            .map_err(DomainError::InvalidConfig)?,
    };
    WatchTarget::new(listing, mode)
}

pub fn threshold(
    args: &HuntArgs,
    target: &WatchTarget,
    prompt: &dyn OperatorPrompt,
) -> Result<ThresholdConfig, DomainError> {
    let label = target.label();
    match target.mode() {
        HuntMode::Inventory => inventory_threshold(args, label, prompt),
        HuntMode::Price => {
            let target_price = match args.price {
                Some(price) => price,
                None => prompt.ask_number("Type the price you would like to target and press enter.", 0)?,
            };
            let comparison = if args.above {
                PriceComparison::GreaterOrEqual
            } else if args.below {
                PriceComparison::LessOrEqual
            } else {
                let answer = prompt.choose(
                    &format!(
                        "Would you like to be notified when the price of {label} is above or below {target_price}? (inclusive)"
                    ),
                    &["above", "below"],
                )?;
                if answer == "above" {
                    PriceComparison::GreaterOrEqual
                } else {
                    PriceComparison::LessOrEqual
                }
            };
            Ok(ThresholdConfig::price(target_price, comparison))
        }
        HuntMode::Player => {
            let item = if args.item.is_some() || args.any {
                args.item.clone()
            } else {
                let answer = prompt.choose(
                    "Would you like to be notified when any sale is made or when a specific item is sold? Type any or specific.",
                    &["any", "specific"],
                )?;
                if answer == "specific" {
                    Some(prompt.ask("Type the item you would like to target and press enter.")?)
                } else {
                    None
                }
            };
            Ok(ThresholdConfig::player(item))
        }
    }
}

fn inventory_threshold(
    args: &HuntArgs,
    label: &str,
    prompt: &dyn OperatorPrompt,
) -> Result<ThresholdConfig, DomainError> {
    if args.empty {
        return Ok(ThresholdConfig::empty());
    }
    if args.stocked {
        return Ok(ThresholdConfig::stocked());
    }
    if let Some(bounds) = &args.range {
        return match bounds.as_slice() {
            [lower, upper] => ThresholdConfig::range(*lower, *upper),
            _ => Err(DomainError::InvalidConfig("--range takes LOW and HIGH".into())),
        };
    }

    let answer = prompt.choose(
        &format!(
            "Would you like to be notified when {label} is empty, stocked, or a specific range is on the AH? Type empty, stocked, or range."
        ),
        &["empty", "stocked", "range"],
    )?;
    match answer.as_str() {
        "empty" => Ok(ThresholdConfig::empty()),
        "stocked" => Ok(ThresholdConfig::stocked()),
        _ => {
            let lower = prompt.ask_number("Type the lowest number in the range (inclusive) and press enter.", 0)?;
            let upper = prompt.ask_number("Type the highest number in the range (inclusive) and press enter.", 0)?;
            ThresholdConfig::range(lower, upper)
        }
    }
}
