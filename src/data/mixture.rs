//! Mixture entries
//!
//! A mixture is a named weighted union of tasks consumed as a single
//! training source. Entries without an explicit rate fall back to the
//! mixture's rate strategy; task names are verified and rates computed at
//! resolution time, against a concrete task registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::task::TaskError;
use crate::registry::TaskRegistry;

/// Errors from resolving a mixture against a task registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MixtureError {
    /// Mixture references a task the registry does not contain
    #[error("Mixture {mixture} references unknown task: {task}")]
    TaskNotFound { mixture: String, task: String },

    /// Rate computation needs a split resolution that failed
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Default weighting policy for entries without an explicit rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateStrategy {
    /// Weight a task by its train-split example count
    #[default]
    ExamplesProportional,
    /// Weight every task equally
    Uniform,
}

/// One member task of a mixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureEntry {
    /// Name of the member task
    pub task: String,
    /// Explicit mixing rate (None = use the mixture's rate strategy)
    pub rate: Option<f64>,
}

/// A named weighted union of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mixture {
    name: String,
    entries: Vec<MixtureEntry>,
    default_rate: RateStrategy,
}

impl Mixture {
    /// Create a mixture over named tasks with a default rate strategy
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, tasks: I, default_rate: RateStrategy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            entries: tasks
                .into_iter()
                .map(|task| MixtureEntry {
                    task: task.into(),
                    rate: None,
                })
                .collect(),
            default_rate,
        }
    }

    /// Pin an explicit rate for one member task
    #[must_use]
    pub fn with_rate(mut self, task: &str, rate: f64) -> Self {
        for entry in &mut self.entries {
            if entry.task == task {
                entry.rate = Some(rate);
            }
        }
        self
    }

    /// Mixture name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member entries in declaration order
    #[must_use]
    pub fn entries(&self) -> &[MixtureEntry] {
        &self.entries
    }

    /// Default weighting policy
    #[must_use]
    pub fn default_rate(&self) -> RateStrategy {
        self.default_rate
    }

    /// Names of member tasks in declaration order
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.task.as_str())
    }

    /// Verify every member task exists and compute the mixing rates.
    ///
    /// Explicit rates pass through; otherwise `ExamplesProportional` weights
    /// a task by its train-split example count and `Uniform` weights 1.0.
    pub fn resolve(&self, tasks: &TaskRegistry) -> Result<ResolvedMixture, MixtureError> {
        let mut rates = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let task = tasks
                .get(&entry.task)
                .map_err(|_| MixtureError::TaskNotFound {
                    mixture: self.name.clone(),
                    task: entry.task.clone(),
                })?;
            let rate = match entry.rate {
                Some(rate) => rate,
                None => match self.default_rate {
                    RateStrategy::ExamplesProportional => task.num_examples("train")? as f64,
                    RateStrategy::Uniform => 1.0,
                },
            };
            rates.push(ResolvedRate {
                task: entry.task.clone(),
                rate,
            });
        }
        Ok(ResolvedMixture {
            name: self.name.clone(),
            rates,
        })
    }
}

/// A member task with its computed mixing rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// Task name
    pub task: String,
    /// Computed mixing rate
    pub rate: f64,
}

/// A mixture with every member verified and every rate computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMixture {
    /// Mixture name
    pub name: String,
    /// Per-task rates in declaration order
    pub rates: Vec<ResolvedRate>,
}

impl ResolvedMixture {
    /// Rate of one member task
    #[must_use]
    pub fn rate(&self, task: &str) -> Option<f64> {
        self.rates
            .iter()
            .find(|r| r.task == task)
            .map(|r| r.rate)
    }

    /// Sum of all rates
    #[must_use]
    pub fn total_rate(&self) -> f64 {
        self.rates.iter().map(|r| r.rate).sum()
    }

    /// Normalized sampling proportion of one member task
    #[must_use]
    pub fn proportion(&self, task: &str) -> Option<f64> {
        let total = self.total_rate();
        if total == 0.0 {
            return None;
        }
        self.rate(task).map(|rate| rate / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Task, TfdsSource};

    fn registry() -> TaskRegistry {
        let mut registry = TaskRegistry::new();
        let source = TfdsSource::new("web_questions", None, "1.0.0")
            .with_split_size("train", 3778)
            .with_split_size("test", 2032);
        registry
            .add(
                Task::builder("wq_small", source.clone())
                    .split("train", "train[:3417]".parse().unwrap())
                    .build()
                    .unwrap(),
            )
            .unwrap();
        registry
            .add(Task::builder("wq_full", source).build().unwrap())
            .unwrap();
        registry
    }

    #[test]
    fn test_resolve_examples_proportional() {
        let mixture = Mixture::new(
            "wq_mix",
            ["wq_small", "wq_full"],
            RateStrategy::ExamplesProportional,
        );
        let resolved = mixture.resolve(&registry()).unwrap();
        assert_eq!(resolved.rate("wq_small"), Some(3417.0));
        assert_eq!(resolved.rate("wq_full"), Some(3778.0));
        assert_eq!(resolved.total_rate(), 7195.0);
    }

    #[test]
    fn test_resolve_uniform() {
        let mixture = Mixture::new("wq_mix", ["wq_small", "wq_full"], RateStrategy::Uniform);
        let resolved = mixture.resolve(&registry()).unwrap();
        assert_eq!(resolved.rate("wq_small"), Some(1.0));
        assert_eq!(resolved.proportion("wq_full"), Some(0.5));
    }

    #[test]
    fn test_explicit_rate_overrides_strategy() {
        let mixture = Mixture::new("wq_mix", ["wq_small", "wq_full"], RateStrategy::Uniform)
            .with_rate("wq_small", 3.0);
        let resolved = mixture.resolve(&registry()).unwrap();
        assert_eq!(resolved.rate("wq_small"), Some(3.0));
        assert_eq!(resolved.rate("wq_full"), Some(1.0));
    }

    #[test]
    fn test_resolve_missing_task() {
        let mixture = Mixture::new("broken", ["wq_small", "missing"], RateStrategy::Uniform);
        assert_eq!(
            mixture.resolve(&registry()).unwrap_err(),
            MixtureError::TaskNotFound {
                mixture: "broken".into(),
                task: "missing".into()
            }
        );
    }

    #[test]
    fn test_resolution_preserves_declaration_order() {
        let mixture = Mixture::new("wq_mix", ["wq_full", "wq_small"], RateStrategy::Uniform);
        let resolved = mixture.resolve(&registry()).unwrap();
        let names: Vec<&str> = resolved.rates.iter().map(|r| r.task.as_str()).collect();
        assert_eq!(names, vec!["wq_full", "wq_small"]);
    }
}
