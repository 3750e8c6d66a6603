use crate::domain::error::CycleError;

/// What an evaluator concluded about one extracted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Not there yet; sleep and poll again.
    ContinueSearching,
    /// Target reached. Ends the watch session.
    Completed { summary: String },
    /// The data could not be interpreted.
    Failure(CycleError),
}

impl Decision {
    pub fn completed(summary: impl Into<String>) -> Self {
        Decision::Completed {
            summary: summary.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Decision::Completed { .. })
    }
}
