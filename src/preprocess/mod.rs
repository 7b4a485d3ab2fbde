//! Text preprocessors
//!
//! Transforms applied to raw examples before tokenization. Each transform
//! takes and returns an [`Example`], so pipelines compose as an ordered list
//! with type-checked feature access in between. Transforms that draw on the
//! rng report themselves non-deterministic; tasks use that to refuse caching
//! configurations that would freeze the randomness.
//!
//! Every QA transform keeps the gold answers on the example (under
//! `answers`) so the postprocessing stage can recover them for scoring.

mod qa;
mod wikipedia;


pub use qa::{
    NaturalQuestionsNocontext, NaturalQuestionsOpen, SampleAnswer, TriviaQaOpen, WebQuestionsOpen,
};
pub use wikipedia::{MaskSalientSpans, Rekey, SPAN_SENTINEL};

use crate::data::{Example, ExampleError};
use rand::RngCore;
use thiserror::Error;

/// Result type for preprocessing operations
pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Errors from applying a text preprocessor
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreprocessError {
    /// Feature access failed
    #[error(transparent)]
    Example(#[from] ExampleError),

    /// QA example carries no answers to select from
    #[error("Example has no answers to select for feature: {0}")]
    NoAnswers(String),

    /// Salient-span example declares no spans
    #[error("Example has no salient spans to mask")]
    NoSalientSpans,

    /// Span boundaries fall outside the text or off a char boundary
    #[error("Salient span {start}..{end} is not valid for a text of {len} bytes")]
    InvalidSpan {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// A transform applied to raw examples before tokenization
pub trait TextPreprocessor: Send + Sync {
    /// Name of the transform, as a task pipeline lists it
    fn name(&self) -> &'static str;

    /// Whether the transform produces the same output for the same input.
    /// Non-deterministic transforms make their task uncacheable.
    fn is_deterministic(&self) -> bool {
        true
    }

    /// Apply the transform to one example
    fn apply(&self, example: Example, rng: &mut dyn RngCore) -> Result<Example>;
}
