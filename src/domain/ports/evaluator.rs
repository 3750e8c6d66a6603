//! Evaluator port for the three watch modes.
//!
//! An [`Evaluator`] is picked once per session from the threshold
//! configuration. Each cycle the poll loop extracts the shape the evaluator
//! asks for and hands the value over for a [`Decision`].

use crate::domain::entities::poll_state::PollState;
use crate::domain::values::decision::Decision;
use crate::domain::values::extracted::{ExtractShape, ExtractedValue};

pub trait Evaluator: Send + Sync {
    /// Unique name for logs.
    fn name(&self) -> &'static str;

    /// What the extractor must pull out of each page.
    fn shape(&self) -> ExtractShape;

    /// Never mutates configuration. Only the Player evaluator touches
    /// `state`, and only its sale watermark.
    fn evaluate(&self, value: &ExtractedValue, state: &mut PollState) -> Decision;
}
