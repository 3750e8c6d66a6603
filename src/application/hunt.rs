//! The poll loop.
//!
//! Each cycle fetches the page, extracts the value the active evaluator
//! needs and asks it for a [`Decision`]. Every failure on the way (transport,
//! page shape, evaluator) is counted, never propagated. The loop stops on a
//! completed decision or once the failure count reaches the limit, leaving the
//! operator to decide whether to resume.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::application::evaluators::evaluator_for;
use crate::application::extract::extract;
use crate::domain::entities::poll_state::PollState;
use crate::domain::entities::watch_target::WatchTarget;
use crate::domain::error::{CycleError, DomainError};
use crate::domain::ports::evaluator::Evaluator;
use crate::domain::ports::notifier::{Notification, Notifier};
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::ports::sleeper::Sleeper;
use crate::domain::values::decision::Decision;
use crate::domain::values::threshold::ThresholdConfig;

pub const MAX_CONSECUTIVE_FAILURES: u32 = 5;
pub const ERROR_BACKOFF: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_POLL_MINUTES: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntSettings {
    pub poll_interval: Duration,
    pub error_backoff: Duration,
    pub max_consecutive_failures: u32,
}

impl HuntSettings {
    pub fn from_minutes(minutes: u64) -> Result<Self, DomainError> {
        if minutes < 1 {
            return Err(DomainError::InvalidConfig(
                "Poll interval must be at least 1 minute".into(),
            ));
        }
        let poll_interval = minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                DomainError::InvalidConfig(format!("Poll interval of {minutes} minutes is too large"))
            })?;
        Ok(Self {
            poll_interval,
            ..Self::default()
        })
    }
}

impl Default for HuntSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_MINUTES * 60),
            error_backoff: ERROR_BACKOFF,
            max_consecutive_failures: MAX_CONSECUTIVE_FAILURES,
        }
    }
}

/// Result of a single fetch -> extract -> evaluate round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Continue,
    Completed { summary: String, notified: bool },
    Failed {
        error: CycleError,
        consecutive_failures: u32,
    },
}

/// Where a call to [`HuntUseCase::run`] stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Target reached and the notifier was called. `notified` is for display only.
    Completed {
        summary: String,
        notified: bool,
        attempts: u64,
    },
    /// Failure limit reached; the counter is left as is for the caller.
    AwaitingOperatorDecision {
        consecutive_failures: u32,
        last_error: CycleError,
    },
}

pub struct HuntUseCase {
    fetcher: Arc<dyn PageFetcher>,
    notifier: Arc<dyn Notifier>,
    sleeper: Arc<dyn Sleeper>,
    settings: HuntSettings,
}

impl HuntUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        notifier: Arc<dyn Notifier>,
        sleeper: Arc<dyn Sleeper>,
        settings: HuntSettings,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            sleeper,
            settings,
        }
    }

    pub fn settings(&self) -> &HuntSettings {
        &self.settings
    }

    /// Polls until the evaluator completes or the failure limit is hit.
    pub async fn run(
        &self,
        target: &WatchTarget,
        evaluator: &dyn Evaluator,
        state: &mut PollState,
    ) -> SessionOutcome {
        let span = info_span!("hunt", session = %state.session_id, label = %target.label());
        async {
            info!(
                base_url = target.base_url(),
                params = ?target.params(),
                evaluator = evaluator.name(),
                "Checking listing"
            );
            loop {
                match self.cycle(target, evaluator, state).await {
                    CycleOutcome::Continue => {
                        self.pause(self.settings.poll_interval).await;
                    }
                    CycleOutcome::Completed { summary, notified } => {
                        return SessionOutcome::Completed {
                            summary,
                            notified,
                            attempts: state.attempt_count,
                        };
                    }
                    CycleOutcome::Failed {
                        error,
                        consecutive_failures,
                    } => {
                        if consecutive_failures >= self.settings.max_consecutive_failures {
                            error!(
                                consecutive_failures,
                                "Failed {consecutive_failures} consecutive times. Stopping for user input"
                            );
                            return SessionOutcome::AwaitingOperatorDecision {
                                consecutive_failures,
                                last_error: error,
                            };
                        }
                        warn!(
                            "Re-attempting {} out of {} times after sleeping",
                            consecutive_failures, self.settings.max_consecutive_failures
                        );
                        self.pause(self.settings.error_backoff).await;
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// One round. Never sleeps.
    pub async fn cycle(
        &self,
        target: &WatchTarget,
        evaluator: &dyn Evaluator,
        state: &mut PollState,
    ) -> CycleOutcome {
        let value = match self.fetcher.fetch(target).await {
            Ok(markup) => extract(&markup, evaluator.shape()),
            Err(e) => Err(e),
        };
        let value = match value {
            Ok(value) => value,
            Err(e) => return Self::fail(state, e),
        };

        state.record_attempt();
        match evaluator.evaluate(&value, state) {
            Decision::ContinueSearching => {
                state.record_success();
                CycleOutcome::Continue
            }
            Decision::Completed { summary } => {
                state.record_success();
                let notified = self.notify(target, &summary).await;
                CycleOutcome::Completed { summary, notified }
            }
            Decision::Failure(e) => Self::fail(state, e),
        }
    }

    fn fail(state: &mut PollState, error: CycleError) -> CycleOutcome {
        let consecutive_failures = state.record_failure();
        error!(
            kind = error.kind(),
            data_shape = error.is_data_shape(),
            consecutive_failures,
            "{error}"
        );
        CycleOutcome::Failed {
            error,
            consecutive_failures,
        }
    }

    async fn notify(&self, target: &WatchTarget, summary: &str) -> bool {
        let notification = Notification::for_target(target, summary);
        match self.notifier.notify(&notification).await {
            Ok(()) => {
                info!(notifier = self.notifier.name(), "Successfully notified");
                true
            }
            Err(e) => {
                error!(notifier = self.notifier.name(), error = %e, "Failed to notify");
                false
            }
        }
    }

    async fn pause(&self, duration: Duration) {
        let minutes = duration.as_secs() / 60;
        if minutes >= 1 {
            let plural = if minutes > 1 { "s" } else { "" };
            info!("Sleeping for {minutes} minute{plural}");
        } else {
            debug!(millis = duration.as_millis() as u64, "Sleeping");
        }
        self.sleeper.sleep(duration).await;
    }
}

/// One watch: target, chosen evaluator, and the state that survives resumes.
pub struct HuntSession {
    target: WatchTarget,
    config: ThresholdConfig,
    evaluator: Box<dyn Evaluator>,
    hunt: HuntUseCase,
    state: PollState,
}

impl HuntSession {
    /// Fails with [`DomainError::InvalidConfig`] before any polling happens.
    pub fn new(
        target: WatchTarget,
        config: ThresholdConfig,
        hunt: HuntUseCase,
    ) -> Result<Self, DomainError> {
        let evaluator = evaluator_for(&target, &config)?;
        Ok(Self {
            target,
            config,
            evaluator,
            hunt,
            state: PollState::new(),
        })
    }

    pub async fn run(&mut self) -> SessionOutcome {
        self.hunt
            .run(&self.target, self.evaluator.as_ref(), &mut self.state)
            .await
    }

    /// Keep trying after the failure limit, with the same watermark.
    pub async fn resume(&mut self) -> SessionOutcome {
        self.state.resume();
        self.run().await
    }

    /// Start over with fresh session state.
    pub fn restart(&mut self) {
        self.state = PollState::new();
    }

    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }
}
