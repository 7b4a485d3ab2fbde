//! Crate-level error type aggregating per-module errors

use thiserror::Error;

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for preguntar operations
#[derive(Debug, Error)]
pub enum Error {
    /// Trainer dispatch error
    #[error(transparent)]
    Trainer(#[from] crate::trainer::TrainerError),

    /// Split expression error
    #[error(transparent)]
    Split(#[from] crate::data::SplitError),

    /// Example feature access error
    #[error(transparent)]
    Example(#[from] crate::data::ExampleError),

    /// Dataset identifier parse error
    #[error(transparent)]
    Source(#[from] crate::data::SourceError),

    /// Task construction error
    #[error(transparent)]
    Task(#[from] crate::data::TaskError),

    /// Preprocessing error
    #[error(transparent)]
    Preprocess(#[from] crate::preprocess::PreprocessError),

    /// Mixture resolution error
    #[error(transparent)]
    Mixture(#[from] crate::data::MixtureError),

    /// Registry error
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),

    /// Metric computation error
    #[error(transparent)]
    Metric(#[from] crate::metrics::MetricError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
