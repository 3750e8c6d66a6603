//! Extraction of stock counts and embedded sales feeds from listing markup.

mod common;

use auction_hunter::application::extract::{extract, extract_stock_count, extract_transactions};
use auction_hunter::domain::error::CycleError;
use auction_hunter::domain::values::extracted::{ExtractShape, ExtractedValue, SalesFeed};
use common::{feed_page, sale, sales_page, stock_page};

// ── Stock count ──────────────────────────────────────────────────────────

#[test]
fn test_stock_zero() {
    assert_eq!(extract_stock_count(&stock_page("0")).unwrap(), 0);
}

#[test]
fn test_stock_with_whitespace_and_nested_markup() {
    let page = r#"<span class="count stock">
        <b> 12 </b>
    </span>"#;
    assert_eq!(extract_stock_count(page).unwrap(), 12);
}

#[test]
fn test_stock_span_inside_wrapper_span() {
    let page = r#"<div><span class="wrap"><span class="stock">3</span></span></div>"#;
    assert_eq!(extract_stock_count(page).unwrap(), 3);
}

#[test]
fn test_stock_ignores_data_class_attribute() {
    let page = r#"<span data-class="stock">9</span><span class="stock">4</span>"#;
    assert_eq!(extract_stock_count(page).unwrap(), 4);
}

#[test]
fn test_stock_missing_element() {
    let page = r#"<html><span class="price">100</span></html>"#;
    assert!(matches!(
        extract_stock_count(page),
        Err(CycleError::ElementNotFound(_))
    ));
}

#[test]
fn test_stock_unparsable_text() {
    let err = extract_stock_count(&stock_page("abc")).unwrap_err();
    assert_eq!(
        err,
        CycleError::UnparsableValue {
            what: "current stock".into(),
            value: "abc".into()
        }
    );
}

#[test]
fn test_stock_negative_is_unparsable() {
    assert!(matches!(
        extract_stock_count(&stock_page("-1")),
        Err(CycleError::UnparsableValue { .. })
    ));
}

#[test]
fn test_stock_first_match_wins() {
    let page = format!("{}{}", stock_page("4"), stock_page("9"));
    assert_eq!(extract_stock_count(&page).unwrap(), 4);
}

#[test]
fn test_extract_dispatches_on_shape() {
    let value = extract(&stock_page("3"), ExtractShape::StockCount).unwrap();
    assert_eq!(value, ExtractedValue::Integer(3));
}

// ── Sales feed ───────────────────────────────────────────────────────────

#[test]
fn test_single_price_only_record() {
    let page = sales_page(r#"Item.sales = [{"price": 1500}];"#);
    let records = extract_transactions(&page, SalesFeed::Item).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sale_price, Some(1500));
    assert_eq!(records[0].item_name, None);
}

#[test]
fn test_price_as_string() {
    let page = sales_page(r#"Item.sales = [{"price": "2500", "saleon": "1600000000"}];"#);
    let records = extract_transactions(&page, SalesFeed::Item).unwrap();
    assert_eq!(records[0].sale_price, Some(2500));
    assert_eq!(records[0].sale_timestamp, Some(1_600_000_000));
}

#[test]
fn test_empty_feed_is_an_error() {
    let page = sales_page("Item.sales = [];");
    assert_eq!(
        extract_transactions(&page, SalesFeed::Item),
        Err(CycleError::EmptyResult)
    );
}

#[test]
fn test_unquoted_key_is_malformed_json() {
    let page = sales_page("Item.sales = [{price: 1500}];");
    assert!(matches!(
        extract_transactions(&page, SalesFeed::Item),
        Err(CycleError::MalformedJson(_))
    ));
}

#[test]
fn test_too_few_scripts() {
    let page = "<script>a</script><script>Item.sales = [{\"price\": 1}]</script>";
    assert_eq!(
        extract_transactions(page, SalesFeed::Item),
        Err(CycleError::ScriptNotFound {
            expected: 8,
            found: 2
        })
    );
}

#[test]
fn test_empty_data_script() {
    let page = sales_page("   ");
    assert_eq!(
        extract_transactions(&page, SalesFeed::Item),
        Err(CycleError::ScriptContentMissing)
    );
}

#[test]
fn test_marker_absent() {
    let page = sales_page(r#"Player.sales = [{"price": 1}];"#);
    assert_eq!(
        extract_transactions(&page, SalesFeed::Item),
        Err(CycleError::MarkerNotFound("Item.sales".into()))
    );
}

#[test]
fn test_no_array_after_marker() {
    let page = sales_page("Item.sales = null;");
    assert_eq!(
        extract_transactions(&page, SalesFeed::Item),
        Err(CycleError::PatternNotFound)
    );
}

#[test]
fn test_match_stops_before_trailing_code() {
    let page = feed_page(
        "Item.sales",
        &[sale("Fire Crystal", "alice", 300, 900), sale("Fire Crystal", "bob", 200, 800)],
    );
    let records = extract_transactions(&page, SalesFeed::Item).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].seller_name.as_deref(), Some("alice"));
    assert_eq!(records[1].sale_price, Some(800));
}

#[test]
fn test_player_feed_requires_names() {
    let page = sales_page(r#"Player.sales = [{"seller_name": "bob", "saleon": 5, "price": 10}];"#);
    assert_eq!(
        extract_transactions(&page, SalesFeed::Player),
        Err(CycleError::IncompleteRecord("item name".into()))
    );

    let page = sales_page(r#"Player.sales = [{"en_name": "Fire Crystal", "saleon": 5}];"#);
    assert_eq!(
        extract_transactions(&page, SalesFeed::Player),
        Err(CycleError::IncompleteRecord("seller name".into()))
    );
}

#[test]
fn test_one_incomplete_record_aborts_player_feed() {
    let page = sales_page(
        r#"Player.sales = [{"en_name": "A", "seller_name": "bob", "saleon": 5}, {"en_name": "", "seller_name": "bob", "saleon": 4}];"#,
    );
    assert!(matches!(
        extract_transactions(&page, SalesFeed::Player),
        Err(CycleError::IncompleteRecord(_))
    ));
}

#[test]
fn test_player_feed_records() {
    let page = feed_page("Player.sales", &[sale("Fire Crystal", "Bob", 100, 5000)]);
    let value = extract(&page, ExtractShape::Transactions(SalesFeed::Player)).unwrap();
    let ExtractedValue::Transactions(records) = value else {
        panic!("expected transactions");
    };
    assert_eq!(records[0], common::record("Fire Crystal", "Bob", 100, 5000));
}
