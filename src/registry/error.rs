//! Registry error types

use thiserror::Error;

use crate::data::MixtureError;

/// Registry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Mixture not found: {0}")]
    MixtureNotFound(String),

    #[error("Task already registered: {0}")]
    DuplicateTask(String),

    #[error("Mixture already registered: {0}")]
    DuplicateMixture(String),

    #[error(transparent)]
    Mixture(#[from] MixtureError),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
