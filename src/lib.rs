//! Preguntar: declarative layer for closed-book question answering research
//!
//! Provides the pieces a CBQA training driver consumes by name:
//!
//! - A task/mixture catalog describing how each QA dataset is read,
//!   preprocessed, postprocessed, and scored ([`tasks`], [`registry`])
//! - The T5-11B pretraining hyperparameter record ([`hparams`])
//! - Trainer dispatch over the recognized training strategies ([`trainer`])
//!
//! The heavy ML machinery (model architecture, distributed execution,
//! tokenization, dataset sharding) lives in external frameworks; task entries
//! here only *name* those framework-side steps.
//!
//! # Example
//!
//! ```
//! use preguntar::tasks::closed_book_qa_catalog;
//!
//! let catalog = closed_book_qa_catalog().unwrap();
//! let task = catalog.tasks().get("trivia_qa_open").unwrap();
//! assert_eq!(task.source().to_string(), "trivia_qa/unfiltered.nocontext:1.1.0");
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod hparams;
pub mod metrics;
pub mod postprocess;
pub mod preprocess;
pub mod registry;
pub mod tasks;
pub mod trainer;

pub use data::{Example, Feature, Mixture, SplitExpr, Task, TfdsSource};
pub use error::{Error, Result};
pub use hparams::PretrainConfig;
pub use registry::{Catalog, MixtureRegistry, TaskRegistry};
pub use trainer::{TrainMethod, Trainer, TrainerParams};
