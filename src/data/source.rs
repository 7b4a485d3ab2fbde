//! External dataset identifiers
//!
//! A [`TfdsSource`] names a dataset managed by an external catalog:
//! `name[/config]:version`. The identifier is opaque here; no dataset I/O
//! happens in this crate. Sources additionally carry the published per-split
//! example counts of that dataset version so example-count-proportional
//! mixing can be resolved offline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from parsing dataset identifiers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// Identifier does not match `name[/config]:version`
    #[error("Invalid dataset identifier (expected 'name[/config]:version'): {0}")]
    InvalidId(String),
}

/// External dataset identifier with declared split sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfdsSource {
    /// Dataset name
    name: String,
    /// Dataset config, if the dataset has more than one
    config: Option<String>,
    /// Dataset version tag
    version: String,
    /// Published example counts per source split
    split_sizes: BTreeMap<String, usize>,
}

impl TfdsSource {
    /// Create a source identifier
    #[must_use]
    pub fn new(name: impl Into<String>, config: Option<&str>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: config.map(String::from),
            version: version.into(),
            split_sizes: BTreeMap::new(),
        }
    }

    /// Declare the published example count of a source split
    #[must_use]
    pub fn with_split_size(mut self, split: impl Into<String>, size: usize) -> Self {
        self.split_sizes.insert(split.into(), size);
        self
    }

    /// Dataset name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dataset config
    #[must_use]
    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Dataset version tag
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Declared example count of a source split, if published
    #[must_use]
    pub fn split_size(&self, split: &str) -> Option<usize> {
        self.split_sizes.get(split).copied()
    }

    /// Names of the splits with declared sizes
    pub fn declared_splits(&self) -> impl Iterator<Item = &str> {
        self.split_sizes.keys().map(String::as_str)
    }
}

impl std::str::FromStr for TfdsSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((id, version)) = s.rsplit_once(':') else {
            return Err(SourceError::InvalidId(s.into()));
        };
        if id.is_empty() || version.is_empty() {
            return Err(SourceError::InvalidId(s.into()));
        }
        let (name, config) = match id.split_once('/') {
            Some((name, config)) if !name.is_empty() && !config.is_empty() => {
                (name, Some(config))
            }
            Some(_) => return Err(SourceError::InvalidId(s.into())),
            None => (id, None),
        };
        Ok(Self::new(name, config, version))
    }
}

impl std::fmt::Display for TfdsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.config {
            Some(config) => write!(f, "{}/{}:{}", self.name, config, self.version),
            None => write!(f, "{}:{}", self.name, self.version),
        }
    }
}
