//! Keyword-count sentiment classifier.

use std::sync::LazyLock;

use candor_core::SentimentLabel;
use regex::Regex;
use serde::Serialize;

use crate::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};

static POSITIVE_RE: LazyLock<Regex> = LazyLock::new(|| whole_word_regex(POSITIVE_WORDS));
static NEGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| whole_word_regex(NEGATIVE_WORDS));

/// Build `\b(?:w1|w2|...)\b` so each hit is a complete word.
///
/// Boundaries are ASCII-only: a letter such as `é` next to a vocabulary word
/// does not join it into a longer word.
fn whole_word_regex(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?-u:\b)(?:{alternation})(?-u:\b)")).expect("valid vocabulary regex")
}

/// Keyword counts behind a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentScore {
    pub positive: usize,
    pub negative: usize,
    /// `positive - negative`.
    pub delta: i64,
    pub label: SentimentLabel,
}

impl SentimentScore {
    fn from_counts(positive: usize, negative: usize) -> Self {
        let positive_count = i64::try_from(positive).unwrap_or(i64::MAX);
        let negative_count = i64::try_from(negative).unwrap_or(i64::MAX);
        let delta = positive_count - negative_count;
        Self {
            positive,
            negative,
            delta,
            label: label_for_delta(delta),
        }
    }
}

/// Net keyword difference of -1, 0 or +1 stays neutral.
fn label_for_delta(delta: i64) -> SentimentLabel {
    if delta > 1 {
        SentimentLabel::Positive
    } else if delta < -1 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Count whole-word vocabulary hits in `text` and derive its label.
///
/// Matching is case-insensitive; a word occurring twice counts twice.
#[must_use]
pub fn score_sentiment(text: &str) -> SentimentScore {
    let lowered = text.to_lowercase();
    let positive = POSITIVE_RE.find_iter(&lowered).count();
    let negative = NEGATIVE_RE.find_iter(&lowered).count();

    let score = SentimentScore::from_counts(positive, negative);
    tracing::trace!(
        positive = score.positive,
        negative = score.negative,
        label = %score.label,
        "scored text"
    );
    score
}

/// Classify `text` as positive, negative or neutral. Total over all inputs.
#[must_use]
pub fn classify_sentiment(text: &str) -> SentimentLabel {
    score_sentiment(text).label
}
