//! Workplace-review vocabularies.
//!
//! Entries are lowercase and the two lists are disjoint.

pub const POSITIVE_WORDS: &[&str] = &[
    "great",
    "excellent",
    "amazing",
    "fantastic",
    "wonderful",
    "awesome",
    "good",
    "best",
    "love",
    "perfect",
    "outstanding",
    "brilliant",
    "superb",
    "impressive",
    "satisfied",
    "happy",
    "pleased",
    "delighted",
    "thrilled",
    "excited",
    "appreciate",
    "recommend",
    // Workplace themes
    "flexible",
    "supportive",
    "helpful",
    "friendly",
    "professional",
    "innovative",
    "growth",
    "opportunity",
    "learning",
    "development",
    "balance",
    "benefits",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "terrible",
    "awful",
    "bad",
    "horrible",
    "worst",
    "hate",
    "disappointing",
    "poor",
    "frustrating",
    "annoying",
    "useless",
    "broken",
    "failed",
    "failure",
    "problem",
    "issue",
    "concerned",
    "worried",
    "stressed",
    // Workplace themes
    "overworked",
    "toxic",
    "unfair",
    "discrimination",
    "harassment",
    "layoffs",
    "fired",
    "quit",
    "leaving",
    "micromanagement",
    "underpaid",
    "overtime",
    "burnout",
    "politics",
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn vocabularies_are_disjoint() {
        let positive: HashSet<&str> = POSITIVE_WORDS.iter().copied().collect();
        let overlap: Vec<&str> = NEGATIVE_WORDS
            .iter()
            .copied()
            .filter(|w| positive.contains(w))
            .collect();
        assert!(overlap.is_empty(), "words in both lists: {overlap:?}");
    }

    #[test]
    fn vocabularies_are_lowercase_single_words() {
        for word in POSITIVE_WORDS.iter().chain(NEGATIVE_WORDS) {
            assert_eq!(*word, word.to_lowercase(), "{word} is not lowercase");
            assert!(!word.contains(' '), "{word} contains whitespace");
        }
    }

    #[test]
    fn vocabularies_have_no_duplicates() {
        let all: Vec<&str> = POSITIVE_WORDS.iter().chain(NEGATIVE_WORDS).copied().collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }
}
