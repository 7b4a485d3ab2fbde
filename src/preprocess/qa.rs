//! Question-answering preprocessors
//!
//! Each transform turns a raw dataset example into the `inputs`/`targets`
//! pair the text-to-text model trains on, with a dataset-specific question
//! prefix. Gold answers stay on the example under `answers`.

use rand::{Rng, RngCore};

use super::{PreprocessError, Result, TextPreprocessor};
use crate::data::{Example, Feature};

/// Natural Questions with all annotators' short answers as the target.
///
/// Reads `question` and per-annotator `answers` (grouped lists; an empty
/// group is a null annotation). The target renders every annotated answer as
/// `answer: {a}` joined by spaces, so the model learns to emit complete
/// answer sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalQuestionsNocontext;

impl TextPreprocessor for NaturalQuestionsNocontext {
    fn name(&self) -> &'static str {
        "natural_questions_nocontext"
    }

    fn apply(&self, mut example: Example, _rng: &mut dyn RngCore) -> Result<Example> {
        let question = example.text("question")?.to_string();
        let annotations = example.nested_text_list("answers")?.to_vec();

        let targets = annotations
            .iter()
            .flatten()
            .map(|answer| format!("answer: {answer}"))
            .collect::<Vec<_>>()
            .join(" ");

        example.set("inputs", Feature::Text(format!("nq question: {question}")));
        example.set("targets", Feature::Text(targets));
        Ok(example)
    }
}

/// Open-domain Natural Questions with a single answer as the target.
///
/// Reads `question` and the flat `answer` list; the model is trained to
/// predict the first listed answer. The full list is kept under `answers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalQuestionsOpen;

impl TextPreprocessor for NaturalQuestionsOpen {
    fn name(&self) -> &'static str {
        "natural_questions_open"
    }

    fn apply(&self, mut example: Example, _rng: &mut dyn RngCore) -> Result<Example> {
        let question = example.text("question")?.to_string();
        let answers = example.text_list("answer")?.to_vec();
        let first = answers
            .first()
            .cloned()
            .ok_or_else(|| PreprocessError::NoAnswers("answer".into()))?;

        example.set("inputs", Feature::Text(format!("nq question: {question}")));
        example.set("targets", Feature::Text(first));
        example.set("answers", Feature::TextList(answers));
        Ok(example)
    }
}

/// Replace `targets` with a uniformly sampled entry of the answer list.
///
/// Stacks after a QA transform that populated `answers`. Sampling happens on
/// every pass, so tasks using this transform must not cache preprocessing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleAnswer;

impl TextPreprocessor for SampleAnswer {
    fn name(&self) -> &'static str {
        "sample_answer"
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    fn apply(&self, mut example: Example, rng: &mut dyn RngCore) -> Result<Example> {
        let answers = example.text_list("answers")?;
        if answers.is_empty() {
            return Err(PreprocessError::NoAnswers("answers".into()));
        }
        let sampled = answers[rng.random_range(0..answers.len())].clone();
        example.set("targets", Feature::Text(sampled));
        Ok(example)
    }
}

/// Open-domain WebQuestions.
///
/// Reads `question` and `answers`; first answer becomes the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebQuestionsOpen;

impl TextPreprocessor for WebQuestionsOpen {
    fn name(&self) -> &'static str {
        "web_questions_open"
    }

    fn apply(&self, mut example: Example, _rng: &mut dyn RngCore) -> Result<Example> {
        let question = example.text("question")?.to_string();
        let answers = example.text_list("answers")?.to_vec();
        let first = answers
            .first()
            .cloned()
            .ok_or_else(|| PreprocessError::NoAnswers("answers".into()))?;

        example.set("inputs", Feature::Text(format!("wq question: {question}")));
        example.set("targets", Feature::Text(first));
        example.set("answers", Feature::TextList(answers));
        Ok(example)
    }
}

/// Open-domain TriviaQA.
///
/// Reads `question`, the canonical `answer_value`, and its `answer_aliases`.
/// The canonical value becomes the target; value plus aliases become the
/// accepted answer set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriviaQaOpen;

impl TextPreprocessor for TriviaQaOpen {
    fn name(&self) -> &'static str {
        "trivia_qa_open"
    }

    fn apply(&self, mut example: Example, _rng: &mut dyn RngCore) -> Result<Example> {
        let question = example.text("question")?.to_string();
        let value = example.text("answer_value")?.to_string();
        let aliases = example.text_list("answer_aliases")?.to_vec();

        let mut answers = vec![value.clone()];
        answers.extend(aliases.into_iter().filter(|alias| *alias != value));

        example.set(
            "inputs",
            Feature::Text(format!("trivia question: {question}")),
        );
        example.set("targets", Feature::Text(value));
        example.set("answers", Feature::TextList(answers));
        Ok(example)
    }
}
