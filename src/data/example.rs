//! Typed example records
//!
//! The common record type every text preprocessor takes and returns. Keeping
//! feature access typed means pipelines compose record-to-record instead of
//! duck-typing on loose dictionaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from typed feature access
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExampleError {
    /// Feature is absent from the example
    #[error("Missing feature: {0}")]
    MissingFeature(String),

    /// Feature exists but holds a different kind of value
    #[error("Feature {name} is {actual}, expected {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// A single feature value.
///
/// Serializes kind-tagged; an untagged form could not tell an empty
/// list of one kind from an empty list of another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Feature {
    /// A single text string
    Text(String),
    /// A flat list of strings (e.g. the answer list of an open-domain task)
    TextList(Vec<String>),
    /// Grouped lists of strings (e.g. per-annotator answer sets)
    NestedTextList(Vec<Vec<String>>),
    /// An integer scalar
    Int(i64),
    /// Byte-offset pairs (e.g. salient span boundaries)
    IntPairs(Vec<(usize, usize)>),
}

impl Feature {
    /// Kind name for error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::TextList(_) => "text list",
            Self::NestedTextList(_) => "nested text list",
            Self::Int(_) => "int",
            Self::IntPairs(_) => "int pairs",
        }
    }
}

/// A dataset example: named features with typed access
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Example {
    features: BTreeMap<String, Feature>,
}

impl Example {
    /// Create an empty example
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text feature
    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(key.into(), Feature::Text(value.into()));
        self
    }

    /// Add a text-list feature
    #[must_use]
    pub fn with_text_list(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.features.insert(key.into(), Feature::TextList(values));
        self
    }

    /// Add a nested text-list feature
    #[must_use]
    pub fn with_nested_text_list(
        mut self,
        key: impl Into<String>,
        values: Vec<Vec<String>>,
    ) -> Self {
        self.features
            .insert(key.into(), Feature::NestedTextList(values));
        self
    }

    /// Add an int-pairs feature
    #[must_use]
    pub fn with_int_pairs(mut self, key: impl Into<String>, pairs: Vec<(usize, usize)>) -> Self {
        self.features.insert(key.into(), Feature::IntPairs(pairs));
        self
    }

    /// Insert or replace a feature
    pub fn set(&mut self, key: impl Into<String>, value: Feature) {
        self.features.insert(key.into(), value);
    }

    /// Remove a feature, returning it if present
    pub fn remove(&mut self, key: &str) -> Option<Feature> {
        self.features.remove(key)
    }

    /// Raw feature lookup
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Feature> {
        self.features.get(key)
    }

    /// Check presence of a feature
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.features.contains_key(key)
    }

    /// Feature names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Number of features
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the example has no features
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    fn feature(&self, key: &str) -> Result<&Feature, ExampleError> {
        self.features
            .get(key)
            .ok_or_else(|| ExampleError::MissingFeature(key.into()))
    }

    /// Typed access to a text feature
    pub fn text(&self, key: &str) -> Result<&str, ExampleError> {
        match self.feature(key)? {
            Feature::Text(s) => Ok(s),
            other => Err(ExampleError::WrongKind {
                name: key.into(),
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    /// Typed access to a text-list feature
    pub fn text_list(&self, key: &str) -> Result<&[String], ExampleError> {
        match self.feature(key)? {
            Feature::TextList(v) => Ok(v),
            other => Err(ExampleError::WrongKind {
                name: key.into(),
                expected: "text list",
                actual: other.kind(),
            }),
        }
    }

    /// Typed access to a nested text-list feature
    pub fn nested_text_list(&self, key: &str) -> Result<&[Vec<String>], ExampleError> {
        match self.feature(key)? {
            Feature::NestedTextList(v) => Ok(v),
            other => Err(ExampleError::WrongKind {
                name: key.into(),
                expected: "nested text list",
                actual: other.kind(),
            }),
        }
    }

    /// Typed access to an int-pairs feature
    pub fn int_pairs(&self, key: &str) -> Result<&[(usize, usize)], ExampleError> {
        match self.feature(key)? {
            Feature::IntPairs(v) => Ok(v),
            other => Err(ExampleError::WrongKind {
                name: key.into(),
                expected: "int pairs",
                actual: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() {
        let example = Example::new()
            .with_text("question", "who wrote hamlet")
            .with_text_list("answer", vec!["William Shakespeare".into()]);

        assert_eq!(example.text("question").unwrap(), "who wrote hamlet");
        assert_eq!(example.text_list("answer").unwrap().len(), 1);
        assert_eq!(example.len(), 2);
    }

    #[test]
    fn test_missing_feature() {
        let example = Example::new();
        assert_eq!(
            example.text("question"),
            Err(ExampleError::MissingFeature("question".into()))
        );
    }

    #[test]
    fn test_wrong_kind() {
        let example = Example::new().with_text("question", "q");
        let err = example.text_list("question").unwrap_err();
        assert!(matches!(err, ExampleError::WrongKind { .. }));
        assert!(err.to_string().contains("text list"));
    }

    #[test]
    fn test_serde_round_trip_preserves_feature_kinds() {
        let example = Example::new()
            .with_text("question", "q")
            .with_text_list("answer", vec![])
            .with_nested_text_list("answers", vec![])
            .with_int_pairs("spans", vec![]);

        let json = serde_json::to_string(&example).unwrap();
        let parsed: Example = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, example);

        // Empty lists keep their kind; the typed accessors still agree.
        assert!(parsed.text_list("answer").unwrap().is_empty());
        assert!(parsed.nested_text_list("answers").unwrap().is_empty());
        assert!(parsed.int_pairs("spans").unwrap().is_empty());
    }

    #[test]
    fn test_set_replaces() {
        let mut example = Example::new().with_text("targets", "old");
        example.set("targets", Feature::Text("new".into()));
        assert_eq!(example.text("targets").unwrap(), "new");
        assert_eq!(example.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut example = Example::new().with_text("inputs", "x");
        assert!(example.remove("inputs").is_some());
        assert!(example.is_empty());
        assert!(example.remove("inputs").is_none());
    }
}
