//! Task and mixture registries
//!
//! Registries are explicitly constructed, passed-around objects rather than
//! ambient process-wide state, so tests can build isolated registries per
//! case. Entries are write-once: registration under a taken name is
//! rejected, never overwritten. Lookup is by exact string match.

mod error;

pub use error::{RegistryError, Result};

use std::collections::BTreeMap;

use crate::data::{Mixture, ResolvedMixture, Task};

/// Registry of task entries keyed by name
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Task>,
}

impl TaskRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task under its name. A taken name is rejected.
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.tasks.contains_key(task.name()) {
            return Err(RegistryError::DuplicateTask(task.name().into()));
        }
        self.tasks.insert(task.name().into(), task);
        Ok(())
    }

    /// Look up a task by exact name
    pub fn get(&self, name: &str) -> Result<&Task> {
        self.tasks
            .get(name)
            .ok_or_else(|| RegistryError::TaskNotFound(name.into()))
    }

    /// Check presence of a task
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered task names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Registered tasks in name order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Number of registered tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if no tasks are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Registry of mixture entries keyed by name
#[derive(Debug, Clone, Default)]
pub struct MixtureRegistry {
    mixtures: BTreeMap<String, Mixture>,
}

impl MixtureRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mixture under its name. A taken name is rejected.
    pub fn add(&mut self, mixture: Mixture) -> Result<()> {
        if self.mixtures.contains_key(mixture.name()) {
            return Err(RegistryError::DuplicateMixture(mixture.name().into()));
        }
        self.mixtures.insert(mixture.name().into(), mixture);
        Ok(())
    }

    /// Look up a mixture by exact name
    pub fn get(&self, name: &str) -> Result<&Mixture> {
        self.mixtures
            .get(name)
            .ok_or_else(|| RegistryError::MixtureNotFound(name.into()))
    }

    /// Check presence of a mixture
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.mixtures.contains_key(name)
    }

    /// Registered mixture names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.mixtures.keys().map(String::as_str)
    }

    /// Registered mixtures in name order
    pub fn iter(&self) -> impl Iterator<Item = &Mixture> {
        self.mixtures.values()
    }

    /// Number of registered mixtures
    #[must_use]
    pub fn len(&self) -> usize {
        self.mixtures.len()
    }

    /// Check if no mixtures are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mixtures.is_empty()
    }
}

/// One task registry and one mixture registry, validated together
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tasks: TaskRegistry,
    mixtures: MixtureRegistry,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Task registry
    #[must_use]
    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    /// Mutable task registry
    pub fn tasks_mut(&mut self) -> &mut TaskRegistry {
        &mut self.tasks
    }

    /// Mixture registry
    #[must_use]
    pub fn mixtures(&self) -> &MixtureRegistry {
        &self.mixtures
    }

    /// Mutable mixture registry
    pub fn mixtures_mut(&mut self) -> &mut MixtureRegistry {
        &mut self.mixtures
    }

    /// Resolve a named mixture against the catalog's tasks
    pub fn resolve_mixture(&self, name: &str) -> Result<ResolvedMixture> {
        Ok(self.mixtures.get(name)?.resolve(&self.tasks)?)
    }

    /// Whole-catalog validation: every mixture must resolve against the task
    /// registry. Returns the first failure.
    pub fn validate(&self) -> Result<()> {
        for mixture in self.mixtures.iter() {
            mixture.resolve(&self.tasks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Mixture, RateStrategy, Task, TfdsSource};

    fn task(name: &str) -> Task {
        let source = TfdsSource::new("web_questions", None, "1.0.0")
            .with_split_size("train", 3778)
            .with_split_size("test", 2032);
        Task::builder(name, source).build().unwrap()
    }

    #[test]
    fn test_add_and_get_task() {
        let mut registry = TaskRegistry::new();
        registry.add(task("wq")).unwrap();
        assert_eq!(registry.get("wq").unwrap().name(), "wq");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let mut registry = TaskRegistry::new();
        registry.add(task("wq")).unwrap();
        assert_eq!(
            registry.add(task("wq")).unwrap_err(),
            RegistryError::DuplicateTask("wq".into())
        );
        // First registration stays intact.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let mut registry = TaskRegistry::new();
        registry.add(task("wq_open")).unwrap();
        assert!(registry.get("wq_open").is_ok());
        assert_eq!(
            registry.get("wq").unwrap_err(),
            RegistryError::TaskNotFound("wq".into())
        );
        assert_eq!(
            registry.get("wq_open ").unwrap_err(),
            RegistryError::TaskNotFound("wq_open ".into())
        );
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = TaskRegistry::new();
        registry.add(task("zeta")).unwrap();
        registry.add(task("alpha")).unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_duplicate_mixture_rejected() {
        let mut registry = MixtureRegistry::new();
        let mixture = Mixture::new("mix", ["wq"], RateStrategy::Uniform);
        registry.add(mixture.clone()).unwrap();
        assert_eq!(
            registry.add(mixture).unwrap_err(),
            RegistryError::DuplicateMixture("mix".into())
        );
    }

    #[test]
    fn test_catalog_validate_ok() {
        let mut catalog = Catalog::new();
        catalog.tasks_mut().add(task("wq")).unwrap();
        catalog
            .mixtures_mut()
            .add(Mixture::new("mix", ["wq"], RateStrategy::Uniform))
            .unwrap();
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_catalog_validate_reports_missing_task() {
        let mut catalog = Catalog::new();
        catalog
            .mixtures_mut()
            .add(Mixture::new("mix", ["ghost"], RateStrategy::Uniform))
            .unwrap();
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("ghost"));
        assert!(err.to_string().contains("mix"));
    }

    #[test]
    fn test_catalog_resolve_mixture() {
        let mut catalog = Catalog::new();
        catalog.tasks_mut().add(task("wq")).unwrap();
        catalog
            .mixtures_mut()
            .add(Mixture::new("mix", ["wq"], RateStrategy::ExamplesProportional))
            .unwrap();
        let resolved = catalog.resolve_mixture("mix").unwrap();
        assert_eq!(resolved.rate("wq"), Some(3778.0));
    }
}
