//! Trainer selection
//!
//! Dispatches a training run to one of the recognized strategies by the
//! `method` name carried in the parameter record. The set of strategies is
//! closed; an unrecognized name is reported as [`TrainerError::UnknownMethod`]
//! rather than silently falling through.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for trainer operations
pub type Result<T> = std::result::Result<T, TrainerError>;

/// Errors that can occur during trainer dispatch
#[derive(Debug, Error)]
pub enum TrainerError {
    /// Method name matches no recognized training strategy
    #[error("Unknown training method: {method} (must be one of: unsupembed, contrastive)")]
    UnknownMethod { method: String },
}

/// Recognized training strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainMethod {
    /// Unsupervised embedding-similarity training
    UnsupEmbed,
    /// Contrastive representation training
    Contrastive,
}

impl std::str::FromStr for TrainMethod {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "unsupembed" => Ok(Self::UnsupEmbed),
            "contrastive" => Ok(Self::Contrastive),
            _ => Err(TrainerError::UnknownMethod { method: s.into() }),
        }
    }
}

impl std::fmt::Display for TrainMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupEmbed => write!(f, "unsupembed"),
            Self::Contrastive => write!(f, "contrastive"),
        }
    }
}

/// Training run parameters shared by both strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerParams {
    /// Training method name (resolved case-insensitively)
    pub method: String,
    /// Dataset to train on
    pub dataset: String,
    /// Batch size
    pub batch_size: usize,
    /// Learning rate
    pub learning_rate: f64,
    /// Number of epochs to train for
    pub num_epochs: usize,
    /// Representation embedding dimension
    pub embed_dim: usize,
    /// Softmax temperature for the contrastive objective
    pub temperature: f64,
    /// PRNG seed
    pub seed: u64,
}

impl Default for TrainerParams {
    fn default() -> Self {
        Self {
            method: "unsupembed".into(),
            dataset: String::new(),
            batch_size: 64,
            learning_rate: 1e-3,
            num_epochs: 30,
            embed_dim: 512,
            temperature: 0.2,
            seed: 0,
        }
    }
}

impl TrainerParams {
    /// Create parameters for a method and dataset
    #[must_use]
    pub fn new(method: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            dataset: dataset.into(),
            ..Default::default()
        }
    }

    /// Load parameters from a YAML file. Missing fields fall back to the
    /// defaults.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

/// Trainer using an unsupervised embedding-similarity objective
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupEmbedTrainer {
    params: TrainerParams,
}

impl UnsupEmbedTrainer {
    /// Create the trainer from the full parameter record
    #[must_use]
    pub fn new(params: TrainerParams) -> Self {
        Self { params }
    }

    /// Parameters this trainer was constructed with
    #[must_use]
    pub fn params(&self) -> &TrainerParams {
        &self.params
    }

    /// Human-readable training objective description
    #[must_use]
    pub fn objective(&self) -> String {
        format!(
            "unsupervised embedding similarity (dim={})",
            self.params.embed_dim
        )
    }
}

/// Trainer using a contrastive representation objective
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastiveTrainer {
    params: TrainerParams,
}

impl ContrastiveTrainer {
    /// Create the trainer from the full parameter record
    #[must_use]
    pub fn new(params: TrainerParams) -> Self {
        Self { params }
    }

    /// Parameters this trainer was constructed with
    #[must_use]
    pub fn params(&self) -> &TrainerParams {
        &self.params
    }

    /// Human-readable training objective description
    #[must_use]
    pub fn objective(&self) -> String {
        format!(
            "contrastive representation (temperature={})",
            self.params.temperature
        )
    }
}

/// A trainer instance of one of the recognized strategies
#[derive(Debug, Clone, PartialEq)]
pub enum Trainer {
    /// Unsupervised embedding-similarity trainer
    UnsupEmbed(UnsupEmbedTrainer),
    /// Contrastive trainer
    Contrastive(ContrastiveTrainer),
}

impl Trainer {
    /// Resolve `params.method` and construct the matching trainer variant.
    ///
    /// Both variants receive the full parameter record. An unrecognized
    /// method name yields [`TrainerError::UnknownMethod`].
    pub fn from_params(params: &TrainerParams) -> Result<Self> {
        match params.method.parse::<TrainMethod>()? {
            TrainMethod::UnsupEmbed => Ok(Self::UnsupEmbed(UnsupEmbedTrainer::new(params.clone()))),
            TrainMethod::Contrastive => {
                Ok(Self::Contrastive(ContrastiveTrainer::new(params.clone())))
            }
        }
    }

    /// The strategy this trainer implements
    #[must_use]
    pub fn method(&self) -> TrainMethod {
        match self {
            Self::UnsupEmbed(_) => TrainMethod::UnsupEmbed,
            Self::Contrastive(_) => TrainMethod::Contrastive,
        }
    }

    /// Parameters this trainer was constructed with
    #[must_use]
    pub fn params(&self) -> &TrainerParams {
        match self {
            Self::UnsupEmbed(t) => t.params(),
            Self::Contrastive(t) => t.params(),
        }
    }

    /// Human-readable training objective description
    #[must_use]
    pub fn objective(&self) -> String {
        match self {
            Self::UnsupEmbed(t) => t.objective(),
            Self::Contrastive(t) => t.objective(),
        }
    }
}
