//! Task and mixture data model
//!
//! Typed records for everything the catalog declares: examples and their
//! features, split selection expressions, external dataset identifiers, task
//! recipes, and weighted task mixtures.

mod example;
mod mixture;
mod source;
mod split;
mod task;

pub use example::{Example, ExampleError, Feature};
pub use mixture::{
    Mixture, MixtureEntry, MixtureError, RateStrategy, ResolvedMixture, ResolvedRate,
};
pub use source::{SourceError, TfdsSource};
pub use split::{SplitError, SplitExpr, SplitSlice};
pub use task::{Task, TaskBuilder, TaskError, TaskSummary, TokenPreprocessor, DEFAULT_SPM_PATH};
