//! QA metric implementations

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::normalize::{normalize_squad, normalize_trivia_qa};
use super::{check_lengths, Metric, MetricError, Result};
use crate::postprocess::QaTarget;

/// Best exact-match or token-F1 of a single prediction over the gold answers,
/// both sides normalized by `normalize`.
fn best_em_f1(golds: &[String], prediction: &str, normalize: fn(&str) -> String) -> (f64, f64) {
    let prediction = normalize(prediction);
    let mut em = 0.0f64;
    let mut f1 = 0.0f64;
    for gold in golds {
        let gold = normalize(gold);
        if gold == prediction {
            em = 1.0;
        }
        f1 = f1.max(token_f1(&gold, &prediction));
    }
    (em, f1)
}

/// Token-level F1 between two normalized answers.
fn token_f1(gold: &str, prediction: &str) -> f64 {
    let gold_tokens: Vec<&str> = gold.split_whitespace().collect();
    let pred_tokens: Vec<&str> = prediction.split_whitespace().collect();
    if gold_tokens.is_empty() || pred_tokens.is_empty() {
        // Both empty counts as a match.
        return f64::from(gold_tokens.is_empty() && pred_tokens.is_empty());
    }

    let mut gold_counts: HashMap<&str, usize> = HashMap::new();
    for token in &gold_tokens {
        *gold_counts.entry(token).or_insert(0) += 1;
    }
    let mut common = 0usize;
    for token in &pred_tokens {
        if let Some(count) = gold_counts.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                common += 1;
            }
        }
    }
    if common == 0 {
        return 0.0;
    }
    let precision = common as f64 / pred_tokens.len() as f64;
    let recall = common as f64 / gold_tokens.len() as f64;
    2.0 * precision * recall / (precision + recall)
}

fn mean_em_f1(
    metric: &'static str,
    targets: &[QaTarget],
    predictions: &[Vec<String>],
    normalize: fn(&str) -> String,
) -> Result<BTreeMap<String, f64>> {
    check_lengths(targets, predictions)?;

    let mut em_sum = 0.0;
    let mut f1_sum = 0.0;
    for (target, prediction) in targets.iter().zip(predictions) {
        let QaTarget::Answers(golds) = target else {
            return Err(MetricError::WrongTargetKind {
                metric,
                expected: "flat answer-list",
            });
        };
        let prediction = prediction.first().map_or("", String::as_str);
        let (em, f1) = best_em_f1(golds, prediction, normalize);
        em_sum += em;
        f1_sum += f1;
    }

    let n = targets.len().max(1) as f64;
    Ok(BTreeMap::from([
        ("em".to_string(), 100.0 * em_sum / n),
        ("f1".to_string(), 100.0 * f1_sum / n),
    ]))
}

/// SQuAD exact-match and token-F1, best over the gold answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquadMetric;

impl Metric for SquadMetric {
    fn name(&self) -> &'static str {
        "squad"
    }

    fn compute(
        &self,
        targets: &[QaTarget],
        predictions: &[Vec<String>],
    ) -> Result<BTreeMap<String, f64>> {
        mean_em_f1("squad", targets, predictions, normalize_squad)
    }
}

/// TriviaQA exact-match and token-F1 under the TriviaQA normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriviaQaMetric;

impl Metric for TriviaQaMetric {
    fn name(&self) -> &'static str {
        "trivia_qa"
    }

    fn compute(
        &self,
        targets: &[QaTarget],
        predictions: &[Vec<String>],
    ) -> Result<BTreeMap<String, f64>> {
        mean_em_f1("trivia_qa", targets, predictions, normalize_trivia_qa)
    }
}

/// Natural Questions answer-set recall.
///
/// A question counts as answerable when at least `non_null_threshold` of its
/// annotations are non-null; a prediction is correct when its normalized
/// answer set equals any single annotator's non-null set. Only recall is
/// reported: without the oracle context the model cannot predict
/// unanswerability.
#[derive(Debug, Clone, Copy)]
pub struct NaturalQuestionsMetric {
    /// Minimum non-null annotations for a question to count as answerable
    pub non_null_threshold: usize,
}

impl Default for NaturalQuestionsMetric {
    fn default() -> Self {
        Self {
            non_null_threshold: 2,
        }
    }
}

impl NaturalQuestionsMetric {
    /// Create the metric with an explicit answerability threshold
    #[must_use]
    pub fn with_threshold(non_null_threshold: usize) -> Self {
        Self { non_null_threshold }
    }
}

impl Metric for NaturalQuestionsMetric {
    fn name(&self) -> &'static str {
        "natural_questions"
    }

    fn compute(
        &self,
        targets: &[QaTarget],
        predictions: &[Vec<String>],
    ) -> Result<BTreeMap<String, f64>> {
        check_lengths(targets, predictions)?;

        let normalize_set = |answers: &[String]| -> BTreeSet<String> {
            answers.iter().map(|a| normalize_squad(a)).collect()
        };

        let mut answerable = 0usize;
        let mut correct = 0usize;
        for (target, prediction) in targets.iter().zip(predictions) {
            let QaTarget::Annotations(annotations) = target else {
                return Err(MetricError::WrongTargetKind {
                    metric: "natural_questions",
                    expected: "per-annotator annotation",
                });
            };
            let non_null: Vec<&Vec<String>> =
                annotations.iter().filter(|a| !a.is_empty()).collect();
            if non_null.len() < self.non_null_threshold {
                continue;
            }
            answerable += 1;

            let predicted = normalize_set(prediction);
            if !predicted.is_empty()
                && non_null
                    .iter()
                    .any(|annotation| normalize_set(annotation) == predicted)
            {
                correct += 1;
            }
        }

        let recall = if answerable == 0 {
            0.0
        } else {
            100.0 * correct as f64 / answerable as f64
        };
        Ok(BTreeMap::from([
            ("recall".to_string(), recall),
            ("golden_answers".to_string(), answerable as f64),
        ]))
    }
}
