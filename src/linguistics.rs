//! Heuristic linguistic analysis: formality, idioms, cultural references,
//! sentiment and grammatical complexity.

use crate::keywords::{
    contains_any_substring, count_substrings, COMPLEX_MARKERS, CULTURAL_REFERENCES,
    FORMAL_MARKERS, IDIOMS, INFORMAL_MARKERS, NEGATIVE_WORDS, POSITIVE_WORDS,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Formal,
    Informal,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarComplexity {
    Simple,
    Moderate,
    Complex,
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Formality::Formal => "formal",
            Formality::Informal => "informal",
            Formality::Neutral => "neutral",
        })
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        })
    }
}

impl fmt::Display for GrammarComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GrammarComplexity::Simple => "simple",
            GrammarComplexity::Moderate => "moderate",
            GrammarComplexity::Complex => "complex",
        })
    }
}

/// Linguistic traits of a text snippet, recomputed per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinguisticProfile {
    pub formality: Formality,
    pub has_idioms: bool,
    pub has_cultural_references: bool,
    pub sentiment: Sentiment,
    pub grammar_complexity: GrammarComplexity,
}

impl LinguisticProfile {
    /// Whether a literal machine translation is likely to lose meaning
    pub fn needs_contextual_translation(&self) -> bool {
        self.has_idioms || self.has_cultural_references || self.formality != Formality::Neutral
    }
}

/// Score a text. Total over all inputs, including the empty string.
pub fn analyze(text: &str) -> LinguisticProfile {
    let text_lower = text.to_lowercase();

    LinguisticProfile {
        formality: detect_formality(&text_lower),
        has_idioms: contains_any_substring(&text_lower, IDIOMS),
        has_cultural_references: contains_any_substring(&text_lower, CULTURAL_REFERENCES),
        sentiment: detect_sentiment(&text_lower),
        grammar_complexity: assess_grammar_complexity(text, &text_lower),
    }
}

fn detect_formality(text_lower: &str) -> Formality {
    let formal = count_substrings(text_lower, FORMAL_MARKERS);
    let informal = count_substrings(text_lower, INFORMAL_MARKERS);

    match formal.cmp(&informal) {
        std::cmp::Ordering::Greater => Formality::Formal,
        std::cmp::Ordering::Less => Formality::Informal,
        std::cmp::Ordering::Equal => Formality::Neutral,
    }
}

fn detect_sentiment(text_lower: &str) -> Sentiment {
    let positive = count_substrings(text_lower, POSITIVE_WORDS);
    let negative = count_substrings(text_lower, NEGATIVE_WORDS);

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Mean words per '.'-separated piece; the trailing piece after a final
/// period counts as an (empty) sentence.
fn mean_sentence_length(text: &str) -> f64 {
    let pieces: Vec<&str> = text.split('.').collect();
    let words: usize = pieces.iter().map(|s| s.split_whitespace().count()).sum();
    words as f64 / pieces.len().max(1) as f64
}

fn assess_grammar_complexity(text: &str, text_lower: &str) -> GrammarComplexity {
    let mean = mean_sentence_length(text);

    if mean > 15.0 || contains_any_substring(text_lower, COMPLEX_MARKERS) {
        GrammarComplexity::Complex
    } else if mean > 8.0 {
        GrammarComplexity::Moderate
    } else {
        GrammarComplexity::Simple
    }
}
