use thiserror::Error;

/// Setup-time failures. These stop the program before polling begins.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}

/// A handled failure inside one fetch -> extract -> evaluate cycle.
///
/// None of these stop the process; the poll loop counts them toward the
/// consecutive-failure limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("An exception was encountered requesting the page: {0}")]
    Transport(String),

    #[error("{0} was not found on the page")]
    ElementNotFound(String),

    #[error("Could not parse {what}: {value:?}")]
    UnparsableValue { what: String, value: String },

    #[error("Script was not found on the page (expected at least {expected}, found {found})")]
    ScriptNotFound { expected: usize, found: usize },

    #[error("Script contents were not found")]
    ScriptContentMissing,

    #[error("{0} were not found")]
    MarkerNotFound(String),

    #[error("Regular expression matching failed")]
    PatternNotFound,

    #[error("Json failed to load: {0}")]
    MalformedJson(String),

    #[error("Sales data contains less than 1 entry")]
    EmptyResult,

    #[error("Transaction has no {0}")]
    IncompleteRecord(String),

    #[error("Last sale has no price data")]
    MissingPrice,

    #[error("No recent sales by {0} were found")]
    SellerNotFound(String),

    #[error("Expected {expected} data but extracted {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl CycleError {
    /// Stable tag used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::Transport(_) => "transport",
            CycleError::ElementNotFound(_) => "element_not_found",
            CycleError::UnparsableValue { .. } => "unparsable_value",
            CycleError::ScriptNotFound { .. } => "script_not_found",
            CycleError::ScriptContentMissing => "script_content_missing",
            CycleError::MarkerNotFound(_) => "marker_not_found",
            CycleError::PatternNotFound => "pattern_not_found",
            CycleError::MalformedJson(_) => "malformed_json",
            CycleError::EmptyResult => "empty_result",
            CycleError::IncompleteRecord(_) => "incomplete_record",
            CycleError::MissingPrice => "missing_price",
            CycleError::SellerNotFound(_) => "seller_not_found",
            CycleError::ShapeMismatch { .. } => "shape_mismatch",
        }
    }

    /// True for failures caused by the page not matching the expected structure.
    pub fn is_data_shape(&self) -> bool {
        !matches!(self, CycleError::Transport(_))
    }
}
