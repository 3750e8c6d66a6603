use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HuntMode {
    Inventory,
    Price,
    Player,
}

impl fmt::Display for HuntMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuntMode::Inventory => write!(f, "inventory"),
            HuntMode::Price => write!(f, "price"),
            HuntMode::Player => write!(f, "player"),
        }
    }
}

impl FromStr for HuntMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inventory" => Ok(HuntMode::Inventory),
            "price" => Ok(HuntMode::Price),
            "player" => Ok(HuntMode::Player),
            _ => Err(format!("Unknown hunt mode: {s}")),
        }
    }
}
