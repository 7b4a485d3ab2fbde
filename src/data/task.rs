//! Task entries
//!
//! A task is a named, fully specified recipe for training or evaluating on
//! one dataset: source, split selection, preprocessing pipeline, declarative
//! token-level steps, postprocessing, and scoring. Tasks are built once via
//! [`TaskBuilder`] and never mutated afterwards.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use super::example::Example;
use super::source::TfdsSource;
use super::split::SplitExpr;
use crate::metrics::Metric;
use crate::postprocess::Postprocessor;
use crate::preprocess::{self, TextPreprocessor};

/// Default sentencepiece vocabulary every task reads unless overridden
pub const DEFAULT_SPM_PATH: &str = "gs://t5-data/vocabs/cc_all.32000/sentencepiece.model";

static TASK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_.:]+$").expect("Invalid task name regex"));

/// Errors from task construction and split resolution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task name is empty or contains characters outside `[a-z0-9_.:]`
    #[error("Invalid task name (must match [a-z0-9_.:]+): {0:?}")]
    InvalidName(String),

    /// A cacheable task contains a non-deterministic preprocessor
    #[error(
        "Task {task} is marked cacheable but preprocessor {preprocessor} is non-deterministic; \
         caching would freeze its randomness"
    )]
    CachingConflict {
        task: String,
        preprocessor: &'static str,
    },

    /// Named split is not defined for the task
    #[error("Task {task} has no split: {split}")]
    UnknownSplit { task: String, split: String },

    /// Split selects an unbounded range of a split with no declared size
    #[error("Cannot determine example count for split {split} of task {task}")]
    UnknownExampleCount { task: String, split: String },
}

/// Declarative marker for a framework-side token-level preprocessing step.
///
/// Token preprocessors run after tokenization inside the training framework;
/// the registry only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPreprocessor {
    /// Random span corruption pretraining objective
    SpanCorruption,
}

impl std::fmt::Display for TokenPreprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpanCorruption => write!(f, "span_corruption"),
        }
    }
}

/// A named recipe for training/evaluating on one dataset
#[derive(Clone)]
pub struct Task {
    name: String,
    source: TfdsSource,
    splits: BTreeMap<String, SplitExpr>,
    pipeline: Vec<Arc<dyn TextPreprocessor>>,
    token_preprocessor: Option<TokenPreprocessor>,
    postprocessor: Option<Arc<dyn Postprocessor>>,
    metrics: Vec<Arc<dyn Metric>>,
    supports_caching: bool,
    vocabulary: String,
}

impl Task {
    /// Start building a task
    #[must_use]
    pub fn builder(name: impl Into<String>, source: TfdsSource) -> TaskBuilder {
        TaskBuilder::new(name, source)
    }

    /// Task name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source dataset identifier
    #[must_use]
    pub fn source(&self) -> &TfdsSource {
        &self.source
    }

    /// Split map (empty = source splits pass through unchanged)
    #[must_use]
    pub fn splits(&self) -> &BTreeMap<String, SplitExpr> {
        &self.splits
    }

    /// Ordered text-preprocessing pipeline
    #[must_use]
    pub fn pipeline(&self) -> &[Arc<dyn TextPreprocessor>] {
        &self.pipeline
    }

    /// Declared token-level preprocessing step, if any
    #[must_use]
    pub fn token_preprocessor(&self) -> Option<TokenPreprocessor> {
        self.token_preprocessor
    }

    /// Postprocessor, if the task is scored
    #[must_use]
    pub fn postprocessor(&self) -> Option<&Arc<dyn Postprocessor>> {
        self.postprocessor.as_ref()
    }

    /// Scoring functions
    #[must_use]
    pub fn metrics(&self) -> &[Arc<dyn Metric>] {
        &self.metrics
    }

    /// Whether preprocessing results may be cached
    #[must_use]
    pub fn supports_caching(&self) -> bool {
        self.supports_caching
    }

    /// Vocabulary path
    #[must_use]
    pub fn vocabulary(&self) -> &str {
        &self.vocabulary
    }

    /// Selection expression for a named split.
    ///
    /// With an explicit split map, unmapped names are an error; without one,
    /// every source split passes through unchanged.
    pub fn split_expr(&self, split: &str) -> Result<SplitExpr, TaskError> {
        if self.splits.is_empty() {
            return Ok(SplitExpr::full(split));
        }
        self.splits
            .get(split)
            .cloned()
            .ok_or_else(|| TaskError::UnknownSplit {
                task: self.name.clone(),
                split: split.into(),
            })
    }

    /// Exact number of examples a named split selects, resolved against the
    /// source's declared split sizes.
    pub fn num_examples(&self, split: &str) -> Result<usize, TaskError> {
        let expr = self.split_expr(split)?;
        expr.num_examples(&self.source)
            .ok_or_else(|| TaskError::UnknownExampleCount {
                task: self.name.clone(),
                split: split.into(),
            })
    }

    /// Run the preprocessing pipeline over one example, in declared order.
    pub fn preprocess(
        &self,
        example: Example,
        rng: &mut dyn rand::RngCore,
    ) -> preprocess::Result<Example> {
        let mut example = example;
        for transform in &self.pipeline {
            example = transform.apply(example, rng)?;
        }
        Ok(example)
    }

    /// Serializable summary of the task for inspection output
    #[must_use]
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            name: self.name.clone(),
            source: self.source.to_string(),
            splits: self
                .splits
                .iter()
                .map(|(name, expr)| (name.clone(), expr.to_string()))
                .collect(),
            pipeline: self.pipeline.iter().map(|p| p.name().to_string()).collect(),
            token_preprocessor: self.token_preprocessor.map(|t| t.to_string()),
            postprocessor: self.postprocessor.as_ref().map(|p| p.name().to_string()),
            metrics: self.metrics.iter().map(|m| m.name().to_string()).collect(),
            supports_caching: self.supports_caching,
            vocabulary: self.vocabulary.clone(),
        }
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("source", &self.source.to_string())
            .field("splits", &self.splits)
            .field(
                "pipeline",
                &self.pipeline.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("token_preprocessor", &self.token_preprocessor)
            .field("supports_caching", &self.supports_caching)
            .finish_non_exhaustive()
    }
}

/// Serializable task summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Task name
    pub name: String,
    /// Source identifier
    pub source: String,
    /// Split map rendered in slicing notation
    pub splits: BTreeMap<String, String>,
    /// Text-preprocessor names in pipeline order
    pub pipeline: Vec<String>,
    /// Token-preprocessor name, if declared
    pub token_preprocessor: Option<String>,
    /// Postprocessor name, if scored
    pub postprocessor: Option<String>,
    /// Metric names
    pub metrics: Vec<String>,
    /// Whether preprocessing results may be cached
    pub supports_caching: bool,
    /// Vocabulary path
    pub vocabulary: String,
}

/// Builder for [`Task`]
#[must_use]
pub struct TaskBuilder {
    name: String,
    source: TfdsSource,
    splits: BTreeMap<String, SplitExpr>,
    pipeline: Vec<Arc<dyn TextPreprocessor>>,
    token_preprocessor: Option<TokenPreprocessor>,
    postprocessor: Option<Arc<dyn Postprocessor>>,
    metrics: Vec<Arc<dyn Metric>>,
    supports_caching: bool,
    vocabulary: String,
}

impl TaskBuilder {
    /// Start a builder for a named task over a source
    pub fn new(name: impl Into<String>, source: TfdsSource) -> Self {
        Self {
            name: name.into(),
            source,
            splits: BTreeMap::new(),
            pipeline: Vec::new(),
            token_preprocessor: None,
            postprocessor: None,
            metrics: Vec::new(),
            supports_caching: true,
            vocabulary: DEFAULT_SPM_PATH.into(),
        }
    }

    /// Map a named split to a selection expression
    pub fn split(mut self, name: impl Into<String>, expr: SplitExpr) -> Self {
        self.splits.insert(name.into(), expr);
        self
    }

    /// Append a text preprocessor to the pipeline
    pub fn preprocessor(mut self, preprocessor: impl TextPreprocessor + 'static) -> Self {
        self.pipeline.push(Arc::new(preprocessor));
        self
    }

    /// Declare a framework-side token-level preprocessing step
    pub fn token_preprocessor(mut self, token: TokenPreprocessor) -> Self {
        self.token_preprocessor = Some(token);
        self
    }

    /// Set the postprocessor
    pub fn postprocessor(mut self, postprocessor: impl Postprocessor + 'static) -> Self {
        self.postprocessor = Some(Arc::new(postprocessor));
        self
    }

    /// Append a scoring function
    pub fn metric(mut self, metric: impl Metric + 'static) -> Self {
        self.metrics.push(Arc::new(metric));
        self
    }

    /// Set whether preprocessing results may be cached (default true)
    pub fn supports_caching(mut self, supported: bool) -> Self {
        self.supports_caching = supported;
        self
    }

    /// Override the vocabulary path
    pub fn vocabulary(mut self, path: impl Into<String>) -> Self {
        self.vocabulary = path.into();
        self
    }

    /// Validate and build the task.
    ///
    /// Rejects malformed names, and cacheable tasks whose pipeline contains a
    /// non-deterministic transform.
    pub fn build(self) -> Result<Task, TaskError> {
        if !TASK_NAME.is_match(&self.name) {
            return Err(TaskError::InvalidName(self.name));
        }
        if self.supports_caching {
            if let Some(transform) = self.pipeline.iter().find(|p| !p.is_deterministic()) {
                return Err(TaskError::CachingConflict {
                    task: self.name,
                    preprocessor: transform.name(),
                });
            }
        }
        Ok(Task {
            name: self.name,
            source: self.source,
            splits: self.splits,
            pipeline: self.pipeline,
            token_preprocessor: self.token_preprocessor,
            postprocessor: self.postprocessor,
            metrics: self.metrics,
            supports_caching: self.supports_caching,
            vocabulary: self.vocabulary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::{NaturalQuestionsOpen, SampleAnswer};

    fn source() -> TfdsSource {
        TfdsSource::new("natural_questions_open", None, "1.0.0")
            .with_split_size("train", 87_925)
            .with_split_size("validation", 3610)
    }

    #[test]
    fn test_builder_defaults() {
        let task = Task::builder("nq_open", source()).build().unwrap();
        assert_eq!(task.name(), "nq_open");
        assert!(task.supports_caching());
        assert_eq!(task.vocabulary(), DEFAULT_SPM_PATH);
        assert!(task.splits().is_empty());
    }

    #[test]
    fn test_invalid_name_rejected() {
        for bad in ["", "Bad Name", "UPPER", "with-dash"] {
            let result = Task::builder(bad, source()).build();
            assert!(
                matches!(result, Err(TaskError::InvalidName(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn test_cacheable_with_sampling_preprocessor_rejected() {
        let err = Task::builder("sampled", source())
            .preprocessor(NaturalQuestionsOpen)
            .preprocessor(SampleAnswer)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TaskError::CachingConflict {
                task: "sampled".into(),
                preprocessor: "sample_answer"
            }
        );
    }

    #[test]
    fn test_uncacheable_with_sampling_preprocessor_allowed() {
        let task = Task::builder("sampled", source())
            .preprocessor(NaturalQuestionsOpen)
            .preprocessor(SampleAnswer)
            .supports_caching(false)
            .build()
            .unwrap();
        assert!(!task.supports_caching());
    }

    #[test]
    fn test_split_expr_passthrough_without_map() {
        let task = Task::builder("t", source()).build().unwrap();
        assert_eq!(task.split_expr("validation").unwrap().to_string(), "validation");
        assert_eq!(task.num_examples("validation").unwrap(), 3610);
    }

    #[test]
    fn test_split_map_is_exhaustive() {
        let task = Task::builder("t", source())
            .split("train", "train[:79168]".parse().unwrap())
            .build()
            .unwrap();
        assert_eq!(task.num_examples("train").unwrap(), 79_168);
        assert_eq!(
            task.num_examples("test").unwrap_err(),
            TaskError::UnknownSplit {
                task: "t".into(),
                split: "test".into()
            }
        );
    }

    #[test]
    fn test_unknown_example_count() {
        let bare = TfdsSource::new("mystery", None, "1.0.0");
        let task = Task::builder("t", bare)
            .split("train", "train[500:]".parse().unwrap())
            .build()
            .unwrap();
        assert_eq!(
            task.num_examples("train").unwrap_err(),
            TaskError::UnknownExampleCount {
                task: "t".into(),
                split: "train".into()
            }
        );
    }

    #[test]
    fn test_preprocess_runs_pipeline_in_order() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let task = Task::builder("t", source())
            .preprocessor(NaturalQuestionsOpen)
            .preprocessor(SampleAnswer)
            .supports_caching(false)
            .build()
            .unwrap();

        let example = Example::new()
            .with_text("question", "who wrote hamlet")
            .with_text_list("answer", vec!["Shakespeare".into()]);
        let mut rng = StdRng::seed_from_u64(0);
        let out = task.preprocess(example, &mut rng).unwrap();
        // SampleAnswer needs the `answers` list the first stage produced.
        assert_eq!(out.text("targets").unwrap(), "Shakespeare");
    }

    #[test]
    fn test_summary_round_trips_as_json() {
        let task = Task::builder("t", source())
            .split("train", "train[:79168]".parse().unwrap())
            .preprocessor(NaturalQuestionsOpen)
            .metric(crate::metrics::SquadMetric)
            .postprocessor(crate::postprocess::Qa)
            .build()
            .unwrap();
        let summary = task.summary();
        assert_eq!(summary.pipeline, vec!["natural_questions_open"]);
        assert_eq!(summary.metrics, vec!["squad"]);
        assert_eq!(summary.postprocessor.as_deref(), Some("qa"));

        let json = serde_json::to_string(&summary).unwrap();
        let parsed: TaskSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }
}
