//! Postprocessors
//!
//! Transforms applied to model output before scoring. A postprocessor serves
//! two roles: decoding a model prediction into one or more answers, and
//! extracting the gold answers a task's preprocessing kept on the example.

use serde::{Deserialize, Serialize};

use crate::data::{Example, ExampleError};

/// Gold answers extracted from an example for scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QaTarget {
    /// A flat set of accepted answers; a prediction matching any is correct
    Answers(Vec<String>),
    /// Per-annotator answer sets; a prediction must match one annotator's
    /// complete set (empty set = null annotation)
    Annotations(Vec<Vec<String>>),
}

/// A transform applied to model output before scoring
pub trait Postprocessor: Send + Sync {
    /// Name of the transform, as a task lists it
    fn name(&self) -> &'static str;

    /// Decode a raw model prediction into one or more answers
    fn prediction(&self, output: &str) -> Vec<String>;

    /// Extract the gold answers from a preprocessed example
    fn target(&self, example: &Example) -> Result<QaTarget, ExampleError>;
}

/// Single-answer QA decoding.
///
/// The model emits one answer; gold answers are the flat `answers` list the
/// preprocessing kept on the example.
#[derive(Debug, Clone, Copy, Default)]
pub struct Qa;

impl Postprocessor for Qa {
    fn name(&self) -> &'static str {
        "qa"
    }

    fn prediction(&self, output: &str) -> Vec<String> {
        vec![output.trim().to_string()]
    }

    fn target(&self, example: &Example) -> Result<QaTarget, ExampleError> {
        Ok(QaTarget::Answers(example.text_list("answers")?.to_vec()))
    }
}

/// Natural Questions answer-set decoding.
///
/// The model emits `answer: {a} answer: {b} ...`; the prediction decodes to
/// the set of emitted answers. Gold answers are the per-annotator groups the
/// preprocessing kept on the example.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalQuestions;

impl Postprocessor for NaturalQuestions {
    fn name(&self) -> &'static str {
        "natural_questions"
    }

    fn prediction(&self, output: &str) -> Vec<String> {
        output
            .split("answer:")
            .map(str::trim)
            .filter(|answer| !answer.is_empty())
            .map(String::from)
            .collect()
    }

    fn target(&self, example: &Example) -> Result<QaTarget, ExampleError> {
        Ok(QaTarget::Annotations(
            example.nested_text_list("answers")?.to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_prediction_trims() {
        assert_eq!(Qa.prediction("  Paris \n"), vec!["Paris".to_string()]);
    }

    #[test]
    fn test_qa_target_reads_answers() {
        let example = Example::new().with_text_list("answers", vec!["Paris".into()]);
        assert_eq!(
            Qa.target(&example).unwrap(),
            QaTarget::Answers(vec!["Paris".into()])
        );
    }

    #[test]
    fn test_qa_target_missing_answers() {
        assert!(Qa.target(&Example::new()).is_err());
    }

    #[test]
    fn test_nq_prediction_splits_on_delimiter() {
        let decoded = NaturalQuestions.prediction("answer: Mary-Kate answer: Ashley");
        assert_eq!(decoded, vec!["Mary-Kate".to_string(), "Ashley".to_string()]);
    }

    #[test]
    fn test_nq_prediction_without_delimiter() {
        // No "answer:" marker means the whole output is one answer.
        assert_eq!(NaturalQuestions.prediction("Ashley"), vec!["Ashley".to_string()]);
    }

    #[test]
    fn test_nq_prediction_empty_output() {
        assert!(NaturalQuestions.prediction("  ").is_empty());
    }

    #[test]
    fn test_nq_target_keeps_annotator_groups() {
        let example = Example::new()
            .with_nested_text_list("answers", vec![vec!["a".into()], vec![]]);
        assert_eq!(
            NaturalQuestions.target(&example).unwrap(),
            QaTarget::Annotations(vec![vec!["a".into()], vec![]])
        );
    }
}
