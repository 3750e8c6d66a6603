//! Pulls typed values out of listing markup.
//!
//! Listing pages carry the stock counter as a `<span class="stock">` and the
//! sales history as a JSON array assigned inside one inline script, e.g.
//! `Item.sales = [{"en_name": ..., "price": ...}, ...];`. Every way the page can
//! fail to match maps to a [`CycleError`]; nothing here panics on input.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::transaction::TransactionRecord;
use crate::domain::error::CycleError;
use crate::domain::values::extracted::{ExtractShape, ExtractedValue, SalesFeed};

/// The sales feed always lives in the eighth script block.
pub const SALES_SCRIPT_INDEX: usize = 7;

const STOCK_CLASS: &str = "stock";

/// Opening tags only; nested spans would be hidden by a whole-element match.
fn span_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<span\b([^>]*)>").expect("span pattern is valid"))
}

fn span_close_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</span\s*>").expect("span close pattern is valid"))
}

fn class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("class pattern is valid")
    })
}

fn script_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>(.*?)</script\s*>").expect("script pattern is valid")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Shortest `[{...}]` run, or a bare `[]` so an empty feed still parses.
/// `.` stops at newlines, so the match cannot swallow following statements.
fn array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\s*\]|\[\{.*?\}\]").expect("array pattern is valid"))
}

pub fn extract(markup: &str, shape: ExtractShape) -> Result<ExtractedValue, CycleError> {
    match shape {
        ExtractShape::StockCount => extract_stock_count(markup).map(ExtractedValue::Integer),
        ExtractShape::Transactions(feed) => {
            extract_transactions(markup, feed).map(ExtractedValue::Transactions)
        }
    }
}

/// Reads the first `<span class="stock">` as a non-negative integer.
pub fn extract_stock_count(markup: &str) -> Result<u64, CycleError> {
    let not_found = || CycleError::ElementNotFound("Current stock".into());
    let open = span_open_regex()
        .captures_iter(markup)
        .find(|caps| {
            caps.get(1)
                .is_some_and(|attrs| has_class(attrs.as_str(), STOCK_CLASS))
        })
        .and_then(|caps| caps.get(0))
        .ok_or_else(not_found)?;

    let rest = &markup[open.end()..];
    let close = span_close_regex().find(rest).ok_or_else(not_found)?;
    let text = tag_regex().replace_all(&rest[..close.start()], "");
    parse_count(text.trim(), "current stock")
}

/// Reads the sales feed from the fixed script block, most recent first.
pub fn extract_transactions(
    markup: &str,
    feed: SalesFeed,
) -> Result<Vec<TransactionRecord>, CycleError> {
    let scripts: Vec<&str> = script_regex()
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if scripts.len() <= SALES_SCRIPT_INDEX {
        return Err(CycleError::ScriptNotFound {
            expected: SALES_SCRIPT_INDEX + 1,
            found: scripts.len(),
        });
    }

    let body = scripts[SALES_SCRIPT_INDEX];
    if body.trim().is_empty() {
        return Err(CycleError::ScriptContentMissing);
    }

    let marker = format!("{} = ", feed.marker());
    let (_, rest) = body
        .split_once(&marker)
        .ok_or_else(|| CycleError::MarkerNotFound(feed.marker().into()))?;

    let array = array_regex()
        .find(rest)
        .ok_or(CycleError::PatternNotFound)?;

    let raw: Vec<RawSale> = serde_json::from_str(array.as_str())
        .map_err(|e| CycleError::MalformedJson(e.to_string()))?;

    if raw.is_empty() {
        return Err(CycleError::EmptyResult);
    }

    raw.into_iter().map(|sale| sale.normalize(feed)).collect()
}

fn has_class(attrs: &str, wanted: &str) -> bool {
    class_regex().captures_iter(attrs).any(|caps| {
        (1..=3)
            .filter_map(|i| caps.get(i))
            .any(|m| m.as_str().split_whitespace().any(|c| c == wanted))
    })
}

fn parse_count(text: &str, what: &str) -> Result<u64, CycleError> {
    text.parse::<u64>().map_err(|_| CycleError::UnparsableValue {
        what: what.into(),
        value: text.into(),
    })
}

/// A sale object as the page serializes it.
#[derive(Debug, Deserialize)]
struct RawSale {
    #[serde(default)]
    en_name: Option<String>,
    #[serde(default)]
    seller_name: Option<String>,
    #[serde(default)]
    saleon: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
}

impl RawSale {
    fn normalize(self, feed: SalesFeed) -> Result<TransactionRecord, CycleError> {
        let record = TransactionRecord {
            item_name: non_empty(self.en_name),
            seller_name: non_empty(self.seller_name),
            sale_timestamp: int_field(self.saleon.as_ref(), "sale time")?,
            sale_price: int_field(self.price.as_ref(), "sale price")?
                .map(|p| {
                    u64::try_from(p).map_err(|_| CycleError::UnparsableValue {
                        what: "sale price".into(),
                        value: p.to_string(),
                    })
                })
                .transpose()?,
        };

        if feed.requires_complete_records() {
            if record.item_name.is_none() {
                return Err(CycleError::IncompleteRecord("item name".into()));
            }
            if record.seller_name.is_none() {
                return Err(CycleError::IncompleteRecord("seller name".into()));
            }
            if record.sale_timestamp.is_none() {
                return Err(CycleError::IncompleteRecord("sale time".into()));
            }
        }

        Ok(record)
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Numbers arrive either as JSON numbers or as numeric strings.
fn int_field(value: Option<&Value>, what: &str) -> Result<Option<i64>, CycleError> {
    let v = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let unparsable = || CycleError::UnparsableValue {
        what: what.into(),
        value: v.to_string(),
    };
    match v {
        Value::Number(n) => n.as_i64().map(Some).ok_or_else(unparsable),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| unparsable()),
        _ => Err(unparsable()),
    }
}
