//! Answer normalization
//!
//! Both normalizations lowercase, drop English articles, and collapse
//! whitespace; they differ in how punctuation and underscores are treated,
//! matching the official SQuAD and TriviaQA evaluation procedures.

use regex::Regex;
use std::sync::LazyLock;

static ARTICLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(a|an|the)\b").expect("Invalid articles regex"));

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// SQuAD-style normalization: lowercase, strip punctuation, drop articles,
/// collapse whitespace.
#[must_use]
pub fn normalize_squad(answer: &str) -> String {
    let lowered = answer.to_lowercase();
    let no_punct = PUNCTUATION.replace_all(&lowered, "");
    let no_articles = ARTICLES.replace_all(&no_punct, " ");
    WHITESPACE
        .replace_all(&no_articles, " ")
        .trim()
        .to_string()
}

/// TriviaQA-style normalization: lowercase, punctuation and underscores
/// become spaces, drop articles, collapse whitespace.
#[must_use]
pub fn normalize_trivia_qa(answer: &str) -> String {
    let lowered = answer.to_lowercase().replace('_', " ");
    let no_punct = PUNCTUATION.replace_all(&lowered, " ");
    let no_articles = ARTICLES.replace_all(&no_punct, " ");
    WHITESPACE
        .replace_all(&no_articles, " ")
        .trim()
        .to_string()
}
