//! The listing being watched.
//!
//! Listing URLs look like `https://www.ffxiah.com/item/4752/fire-crystal`,
//! optionally suffixed with `/?stack=1` for the stack listing, or
//! `https://www.ffxiah.com/player/asura/somebody` for a seller.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::values::hunt_mode::HuntMode;

const STACK_SUFFIX: &str = "/?stack=1";
const PLAYER_PAGE: &str = "player";

/// A pasted listing URL split into request parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingUrl {
    /// As pasted.
    pub url: String,
    pub base_url: String,
    pub params: Vec<(String, String)>,
    /// Path segment naming the page kind (`item`, `player`, ...).
    pub page_type: String,
    pub label: String,
}

impl ListingUrl {
    pub fn parse(url: &str) -> Result<Self, DomainError> {
        let url = url.trim();
        let (base_url, params) = match url.rsplit_once(STACK_SUFFIX) {
            Some((base, _)) => (base, vec![("stack".to_string(), "1".to_string())]),
            None => (url, Vec::new()),
        };

        // rsplitn yields [tail, id, page_type, prefix]
        let segments: Vec<&str> = base_url.rsplitn(4, '/').collect();
        if segments.len() < 4 {
            return Err(DomainError::InvalidUrl(format!(
                "Must supply an entire listing url, got {url}"
            )));
        }

        let mut label = segments[0].to_string();
        if label.is_empty() {
            return Err(DomainError::InvalidUrl(format!(
                "No item or player name at the end of {url}"
            )));
        }
        if !params.is_empty() {
            label.push_str("-stack");
        }

        Ok(Self {
            url: url.to_string(),
            base_url: base_url.to_string(),
            params,
            page_type: segments[2].to_string(),
            label,
        })
    }

    pub fn is_player_page(&self) -> bool {
        self.page_type.eq_ignore_ascii_case(PLAYER_PAGE)
    }

    pub fn is_stack(&self) -> bool {
        self.params.iter().any(|(k, _)| k == "stack")
    }
}

impl FromStr for ListingUrl {
    type Err = DomainError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// What one watch session polls. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    listing: ListingUrl,
    mode: HuntMode,
}

impl WatchTarget {
    /// Player pages only support Player mode, item pages only Inventory and Price.
    pub fn new(listing: ListingUrl, mode: HuntMode) -> Result<Self, DomainError> {
        let player_page = listing.is_player_page();
        if player_page != (mode == HuntMode::Player) {
            return Err(DomainError::InvalidConfig(format!(
                "{mode} mode cannot watch a {} page",
                listing.page_type
            )));
        }
        Ok(Self { listing, mode })
    }

    /// Builds a target, picking Player mode for player pages.
    pub fn from_url(url: &str, item_mode: HuntMode) -> Result<Self, DomainError> {
        let listing = ListingUrl::parse(url)?;
        let mode = if listing.is_player_page() {
            HuntMode::Player
        } else {
            item_mode
        };
        Self::new(listing, mode)
    }

    pub fn url(&self) -> &str {
        &self.listing.url
    }

    pub fn base_url(&self) -> &str {
        &self.listing.base_url
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.listing.params
    }

    pub fn label(&self) -> &str {
        &self.listing.label
    }

    pub fn mode(&self) -> HuntMode {
        self.mode
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.listing.label, self.mode)
    }
}
