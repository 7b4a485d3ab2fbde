//! Closed-book QA task and mixture declarations
//!
//! Declares every CBQA benchmark task entry-for-entry: the Natural Questions
//! variants, WebQuestions, TriviaQA, the tuning/test mixtures, and the two
//! Wikipedia pretraining tasks. Source identifiers carry the published
//! per-split example counts of the pinned dataset versions so
//! example-count-proportional mixing resolves offline.
//!
//! Each open-domain task exists in two flavors: a tuning task that carves a
//! validation set out of the train split, and a `_test` task that trains on
//! everything and evaluates on the held-out split.

use crate::data::{Mixture, RateStrategy, SplitExpr, Task, TfdsSource, TokenPreprocessor};
use crate::metrics::{NaturalQuestionsMetric, SquadMetric, TriviaQaMetric};
use crate::postprocess::{NaturalQuestions, Qa};
use crate::preprocess::{
    MaskSalientSpans, NaturalQuestionsNocontext, NaturalQuestionsOpen, Rekey, SampleAnswer,
    TriviaQaOpen, WebQuestionsOpen,
};
use crate::registry::Catalog;
use crate::Result;

fn natural_questions() -> TfdsSource {
    TfdsSource::new("natural_questions", None, "0.0.2")
        .with_split_size("train", 307_373)
        .with_split_size("validation", 7830)
}

fn natural_questions_open() -> TfdsSource {
    TfdsSource::new("natural_questions_open", None, "1.0.0")
        .with_split_size("train", 87_925)
        .with_split_size("validation", 3610)
}

fn web_questions() -> TfdsSource {
    TfdsSource::new("web_questions", None, "1.0.0")
        .with_split_size("train", 3778)
        .with_split_size("test", 2032)
}

fn trivia_qa() -> TfdsSource {
    TfdsSource::new("trivia_qa", Some("unfiltered.nocontext"), "1.1.0")
        .with_split_size("train", 87_622)
        .with_split_size("validation", 11_313)
        .with_split_size("test", 10_832)
}

fn salient_span_wikipedia() -> TfdsSource {
    TfdsSource::new("salient_span_wikipedia", Some("sentences"), "1.0.0")
}

fn expr(s: &str) -> Result<SplitExpr> {
    Ok(s.parse()?)
}

/// Register every closed-book QA task and mixture into a catalog.
pub fn register_closed_book_qa(catalog: &mut Catalog) -> Result<()> {
    let tasks = catalog.tasks_mut();

    // Natural Questions variant closest to the official evaluation: the
    // model predicts all ground-truth answers and is correct only if it
    // matches all answers of one annotator. Questions with fewer than two
    // non-null annotations are unanswerable, and without the oracle context
    // only recall is computable. Uses a portion of the train set for
    // validation.
    tasks.add(
        Task::builder("natural_questions_nocontext", natural_questions())
            .split("train", expr("train[7830:79168]")?)
            .split("validation", expr("train[:7830]")?)
            .split("test", expr("validation")?)
            .preprocessor(NaturalQuestionsNocontext)
            .postprocessor(NaturalQuestions)
            // Train set does not contain multiple annotations.
            .metric(NaturalQuestionsMetric::with_threshold(1))
            .build()?,
    )?;

    // Full train split; reports metrics on the NQ validation split, which is
    // the test set in the open-domain setting.
    tasks.add(
        Task::builder("natural_questions_nocontext_test", natural_questions())
            .preprocessor(NaturalQuestionsNocontext)
            .postprocessor(NaturalQuestions)
            .metric(NaturalQuestionsMetric::default())
            .build()?,
    )?;

    // Standard open-domain Natural Questions: single-answer prediction,
    // trained on the first listed answer. The ~90/10 train carve matches the
    // ORQA numbers.
    tasks.add(
        Task::builder("natural_questions_open", natural_questions_open())
            .split("train", expr("train[:79168]")?)
            .split("validation", expr("train[79168:]")?)
            .split("test", expr("validation")?)
            .preprocessor(NaturalQuestionsOpen)
            .postprocessor(Qa)
            .metric(SquadMetric)
            .build()?,
    )?;

    // Variant that samples a random answer when multiple are provided
    // instead of using the first. Caching is off so each pass samples anew.
    tasks.add(
        Task::builder("natural_questions_open_randanswer", natural_questions_open())
            .split("train", expr("train[79168:]")?)
            .split("validation", expr("train[:79168]")?)
            .split("test", expr("validation")?)
            .preprocessor(NaturalQuestionsOpen)
            .preprocessor(SampleAnswer)
            .supports_caching(false)
            .postprocessor(Qa)
            .metric(SquadMetric)
            .build()?,
    )?;

    tasks.add(
        Task::builder("natural_questions_open_test", natural_questions_open())
            .preprocessor(NaturalQuestionsOpen)
            .postprocessor(Qa)
            .metric(SquadMetric)
            .build()?,
    )?;

    // WebQuestions, with 10% of the train split held out for validation.
    tasks.add(
        Task::builder("web_questions_open", web_questions())
            .split("train", expr("train[:3417]")?)
            .split("validation", expr("train[3417:]")?)
            .split("test", expr("test")?)
            .preprocessor(WebQuestionsOpen)
            .postprocessor(Qa)
            .metric(SquadMetric)
            .build()?,
    )?;

    tasks.add(
        Task::builder("web_questions_open_test", web_questions())
            .split("train", expr("train")?)
            .split("validation", expr("test")?)
            .preprocessor(WebQuestionsOpen)
            .postprocessor(Qa)
            .metric(SquadMetric)
            .build()?,
    )?;

    tasks.add(
        Task::builder("trivia_qa_open", trivia_qa())
            .split("train", expr("train[:78785]")?)
            .split("validation", expr("train[78785:]")?)
            .split("test", expr("validation")?)
            .preprocessor(TriviaQaOpen)
            .postprocessor(Qa)
            .metric(TriviaQaMetric)
            .build()?,
    )?;

    // Trains on combined train and validation splits.
    tasks.add(
        Task::builder("trivia_qa_open_test", trivia_qa())
            .split("train", expr("train+validation")?)
            .split("test", expr("test")?)
            .preprocessor(TriviaQaOpen)
            .postprocessor(Qa)
            .metric(TriviaQaMetric)
            .build()?,
    )?;

    // Salient span masking over Wikipedia sentences, unscored.
    tasks.add(
        Task::builder("salient_span_masked_wikipedia", salient_span_wikipedia())
            .preprocessor(MaskSalientSpans)
            .build()?,
    )?;

    // Same corpus under the standard span-corruption pretraining objective;
    // corruption itself runs framework-side after tokenization.
    tasks.add(
        Task::builder("span_corrupted_wikipedia", salient_span_wikipedia())
            .preprocessor(Rekey::default().drop("inputs").map("targets", "text"))
            .token_preprocessor(TokenPreprocessor::SpanCorruption)
            .build()?,
    )?;

    let mixtures = catalog.mixtures_mut();

    // Hyperparameter-tuning mixture: trains on the carved train subsplits
    // and evaluates on the held-out validation portions.
    mixtures.add(Mixture::new(
        "closed_book_qa",
        ["trivia_qa_open", "natural_questions_open", "web_questions_open"],
        RateStrategy::ExamplesProportional,
    ))?;

    // Test-time mixture: trains on combined train+validation and evaluates
    // on the test split.
    mixtures.add(Mixture::new(
        "closed_book_qa_test",
        [
            "trivia_qa_open_test",
            "natural_questions_open_test",
            "web_questions_open_test",
        ],
        RateStrategy::ExamplesProportional,
    ))?;

    Ok(())
}

/// Build a fresh catalog holding the full closed-book QA registration table.
pub fn closed_book_qa_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    register_closed_book_qa(&mut catalog)?;
    Ok(catalog)
}
