//! Scoring functions
//!
//! Metrics score postprocessed predictions against gold targets and report
//! named scores on the 0-100 scale the evaluation suite uses. Each metric
//! normalizes answers before comparing them, since a closed-book model has no
//! oracle context to copy surface forms from.

mod normalize;
mod qa;


pub use normalize::{normalize_squad, normalize_trivia_qa};
pub use qa::{NaturalQuestionsMetric, SquadMetric, TriviaQaMetric};

use std::collections::BTreeMap;
use thiserror::Error;

use crate::postprocess::QaTarget;

/// Result type for metric computation
pub type Result<T> = std::result::Result<T, MetricError>;

/// Errors from metric computation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricError {
    /// Target and prediction lists differ in length
    #[error("Length mismatch: {targets} targets vs {predictions} predictions")]
    LengthMismatch {
        targets: usize,
        predictions: usize,
    },

    /// Target variant does not fit the metric
    #[error("Metric {metric} expects {expected} targets")]
    WrongTargetKind {
        metric: &'static str,
        expected: &'static str,
    },
}

/// A scoring function over a task's postprocessed predictions
pub trait Metric: Send + Sync {
    /// Name of the metric, as a task lists it
    fn name(&self) -> &'static str;

    /// Compute named scores for aligned target/prediction lists
    fn compute(
        &self,
        targets: &[QaTarget],
        predictions: &[Vec<String>],
    ) -> Result<BTreeMap<String, f64>>;
}

pub(crate) fn check_lengths(targets: &[QaTarget], predictions: &[Vec<String>]) -> Result<()> {
    if targets.len() != predictions.len() {
        return Err(MetricError::LengthMismatch {
            targets: targets.len(),
            predictions: predictions.len(),
        });
    }
    Ok(())
}
