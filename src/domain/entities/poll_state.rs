use uuid::Uuid;

/// Mutable state of one watch session, owned by the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub session_id: String,
    /// Cycles that reached evaluation.
    pub attempt_count: u64,
    pub consecutive_failure_count: u32,
    /// Player-mode watermark; unset until the seller's latest sale is first seen.
    pub last_seen_sale_timestamp: Option<i64>,
}

impl PollState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            attempt_count: 0,
            consecutive_failure_count: 0,
            last_seen_sale_timestamp: None,
        }
    }

    /// Counts a fetch + extraction that produced a value.
    pub fn record_attempt(&mut self) -> u64 {
        self.attempt_count += 1;
        self.attempt_count
    }

    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failure_count += 1;
        self.consecutive_failure_count
    }

    pub fn record_success(&mut self) {
        self.consecutive_failure_count = 0;
    }

    /// Operator chose to keep trying after the failure limit.
    pub fn resume(&mut self) {
        self.consecutive_failure_count = 0;
    }
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}
