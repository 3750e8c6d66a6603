use crate::domain::entities::transaction::TransactionRecord;

/// Which sales feed an inline script carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesFeed {
    /// `Item.sales` on an item listing page.
    Item,
    /// `Player.sales` on a player page.
    Player,
}

impl SalesFeed {
    pub fn marker(&self) -> &'static str {
        match self {
            SalesFeed::Item => "Item.sales",
            SalesFeed::Player => "Player.sales",
        }
    }

    /// Player pages are useless without names and timestamps on every record.
    pub fn requires_complete_records(&self) -> bool {
        matches!(self, SalesFeed::Player)
    }
}

/// The shape an evaluator wants pulled out of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractShape {
    /// The "current stock" counter.
    StockCount,
    Transactions(SalesFeed),
}

/// Result of parsing one fetched page. Lives for a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedValue {
    Integer(u64),
    /// Most recent first.
    Transactions(Vec<TransactionRecord>),
}

impl ExtractedValue {
    pub fn shape_name(&self) -> &'static str {
        match self {
            ExtractedValue::Integer(_) => "integer",
            ExtractedValue::Transactions(_) => "transaction list",
        }
    }
}
