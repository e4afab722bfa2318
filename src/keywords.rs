//! Static keyword tables used by the analyzer, the classifier and the
//! fallback replies.
//!
//! All entries are lowercase. Matching helpers live here too so every caller
//! agrees on what "mentions a keyword" means.

// ==================== Linguistic Analysis ====================

pub const IDIOMS: &[&str] = &[
    "piece of cake",
    "break a leg",
    "raining cats and dogs",
    "kill two birds",
    "the ball is in your court",
    "break the ice",
    "once in a blue moon",
    "bite the bullet",
    "hit the nail on the head",
    "when pigs fly",
    "under the weather",
    "cost an arm and a leg",
];

pub const FORMAL_MARKERS: &[&str] = &[
    "sir", "madam", "please", "kindly", "would you", "could you", "may i",
];

pub const INFORMAL_MARKERS: &[&str] = &[
    "hey", "yo", "what's up", "gonna", "wanna", "yeah", "nah",
];

pub const CULTURAL_REFERENCES: &[&str] = &[
    "thanksgiving",
    "diwali",
    "christmas",
    "ramadan",
    "new year",
    "subway",
    "underground",
    "tube",
    "metro",
    "football",
    "soccer",
    "dollars",
    "euros",
    "pounds",
    "rupees",
    "yen",
];

pub const POSITIVE_WORDS: &[&str] = &[
    "great", "excellent", "wonderful", "amazing", "fantastic", "love", "happy",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "terrible", "awful", "hate", "angry", "frustrated", "disappointed", "bad",
];

pub const COMPLEX_MARKERS: &[&str] = &[
    "however",
    "nevertheless",
    "furthermore",
    "consequently",
    "meanwhile",
    "which",
    "whom",
    "whose",
    "that",
    "although",
    "whereas",
];

// ==================== Intent Classification ====================

pub const TRANSLATION_KEYWORDS: &[&str] = &[
    "translate",
    "translation",
    "convert to",
    "how to say",
    "what does",
    "mean in",
    "say in",
];

pub const SDG_KEYWORDS: &[&str] = &[
    "sdg",
    "sustainable development",
    "inequality",
    "equality",
    "discrimination",
    "rights",
    "barrier",
];

pub const HELP_KEYWORDS: &[&str] = &[
    "help",
    "what can you do",
    "features",
    "how do you work",
    "capabilities",
];

pub const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

pub const LANGUAGE_CULTURE_KEYWORDS: &[&str] = &[
    "language",
    "speak",
    "communication",
    "culture",
    "cultural",
    "idiom",
    "phrase",
    "expression",
    "formality",
    "formal",
    "informal",
    "grammar",
    "figurative",
    "literal",
    "politeness",
    "ambiguous",
    "ambiguity",
    "sentiment",
    "tone",
];

pub const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "technology",
    "ai",
    "artificial intelligence",
    "machine learning",
    "nlp",
    "natural language",
    "computer",
    "programming",
    "science",
    "physics",
    "chemistry",
    "biology",
    "mathematics",
];

pub const QUESTION_KEYWORDS: &[&str] = &[
    "what is",
    "how does",
    "why is",
    "explain",
    "tell me about",
    "describe",
    "define",
    "difference between",
];

// ==================== Fallback Replies ====================

pub const FALLBACK_TRANSLATION: &[&str] = &["translate", "translation", "convert"];

pub const FALLBACK_HELP: &[&str] = &["help", "what can you do", "how do you work", "features"];

pub const FALLBACK_SDG: &[&str] = &[
    "inequality",
    "discrimination",
    "equality",
    "rights",
    "inclusion",
    "sdg",
    "sustainable",
];

pub const FALLBACK_QUESTION: &[&str] = &["what", "how", "why", "when", "where", "who"];

// ==================== Matching ====================

/// Case-sensitive substring count over a lowercase text.
pub fn count_substrings(text_lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text_lower.contains(*kw)).count()
}

/// True if any keyword occurs as a substring of a lowercase text.
pub fn contains_any_substring(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text_lower.contains(kw))
}

/// Single-word keywords up to this length must match a whole word.
const SHORT_KEYWORD_CHARS: usize = 3;

/// True if the lowercase text mentions the keyword.
///
/// Short single words must match a whole word ("ai" does not match "said",
/// "how" does not match "however"). Longer single words also match as a
/// word prefix, so "translated" and "helpful" count. Phrases and keywords
/// with punctuation match as substrings.
pub fn mentions(text_lower: &str, keyword: &str) -> bool {
    if keyword.chars().all(char::is_alphanumeric) {
        let short = keyword.chars().count() <= SHORT_KEYWORD_CHARS;
        text_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == keyword || (!short && word.starts_with(keyword)))
    } else {
        text_lower.contains(keyword)
    }
}

/// True if the lowercase text mentions any of the keywords.
pub fn mentions_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| mentions(text_lower, kw))
}
