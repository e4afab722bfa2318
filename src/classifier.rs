//! Query intent classification and in-chat translation request parsing.

use crate::i18n::Language;
use crate::keywords::{
    mentions_any, GREETING_KEYWORDS, HELP_KEYWORDS, LANGUAGE_CULTURE_KEYWORDS, QUESTION_KEYWORDS,
    SDG_KEYWORDS, TECHNOLOGY_KEYWORDS, TRANSLATION_KEYWORDS,
};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Greetings longer than this are treated as ordinary messages
const GREETING_MAX_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    Translation,
    SdgEquality,
    HelpInfo,
    Greeting,
    LanguageCulture,
    GeneralQuestion,
    General,
}

impl QueryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryIntent::Translation => "translation",
            QueryIntent::SdgEquality => "sdg_equality",
            QueryIntent::HelpInfo => "help_info",
            QueryIntent::Greeting => "greeting",
            QueryIntent::LanguageCulture => "language_culture",
            QueryIntent::GeneralQuestion => "general_question",
            QueryIntent::General => "general",
        }
    }
}

impl std::fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a lowercase message. First match wins; the order is significant.
pub fn classify(message_lower: &str) -> QueryIntent {
    if mentions_any(message_lower, TRANSLATION_KEYWORDS) {
        QueryIntent::Translation
    } else if mentions_any(message_lower, SDG_KEYWORDS) {
        QueryIntent::SdgEquality
    } else if mentions_any(message_lower, HELP_KEYWORDS) {
        QueryIntent::HelpInfo
    } else if mentions_any(message_lower, GREETING_KEYWORDS)
        && message_lower.split_whitespace().count() <= GREETING_MAX_WORDS
    {
        QueryIntent::Greeting
    } else if mentions_any(message_lower, LANGUAGE_CULTURE_KEYWORDS) {
        QueryIntent::LanguageCulture
    } else if mentions_any(message_lower, TECHNOLOGY_KEYWORDS)
        || mentions_any(message_lower, QUESTION_KEYWORDS)
        || message_lower.contains('?')
    {
        QueryIntent::GeneralQuestion
    } else {
        QueryIntent::General
    }
}

/// Text span and target extracted from a chat message such as
/// "translate good morning to French".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    /// `None` when the message names no supported language
    pub target: Option<Language>,
}

static COLON_FORM: OnceLock<Regex> = OnceLock::new();
static TRAILING_TARGET: OnceLock<Regex> = OnceLock::new();
static LEADING_TARGET: OnceLock<Regex> = OnceLock::new();
static BARE_TRANSLATE: OnceLock<Regex> = OnceLock::new();
static TARGET_AFTER_PREPOSITION: OnceLock<Regex> = OnceLock::new();
static WORD: OnceLock<Regex> = OnceLock::new();
static ONLY_TARGET: OnceLock<Regex> = OnceLock::new();

/// Language codes that are also everyday English words ("used to it",
/// "say hi in"). They never name a target; the language name still does.
const WORD_LIKE_CODES: &[&str] = &["hi", "it", "mr", "pa", "ta", "te"];

fn colon_form() -> &'static Regex {
    // "Convert this text to French: bonjour tout le monde"
    COLON_FORM.get_or_init(|| {
        Regex::new(r"(?is)^(.*?\b(?:translate|convert)\b[^:]*):\s*(.+)$").expect("valid regex")
    })
}

fn trailing_target() -> &'static Regex {
    // "translate good morning to French", "how to say thank you in Japanese"
    TRAILING_TARGET.get_or_init(|| {
        Regex::new(r"(?is)\b(?:translate|say)\s+(.+?)\s+(?:to|into|in)\s+(\p{L}+)[\s.!?]*$")
            .expect("valid regex")
    })
}

fn leading_target() -> &'static Regex {
    // "translate to Spanish where is the station"
    LEADING_TARGET.get_or_init(|| {
        Regex::new(r"(?is)\btranslate\s+(?:to|into|in)\s+(\p{L}+)\s+(.+)$").expect("valid regex")
    })
}

fn bare_translate() -> &'static Regex {
    BARE_TRANSLATE.get_or_init(|| Regex::new(r"(?is)\btranslate\s+(.+)$").expect("valid regex"))
}

fn target_after_preposition() -> &'static Regex {
    TARGET_AFTER_PREPOSITION
        .get_or_init(|| Regex::new(r"(?i)\b(?:to|into|in)\s+(\p{L}+)").expect("valid regex"))
}

fn word() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"\p{L}+").expect("valid regex"))
}

fn only_target() -> &'static Regex {
    // "translate to spanish" leaves just "to spanish"
    ONLY_TARGET.get_or_init(|| {
        Regex::new(r"(?i)^(?:to|into|in)\s+(\p{L}+)[\s.!?]*$").expect("valid regex")
    })
}

/// Language named by a single word, skipping codes that read as English.
fn target_word(word: &str) -> Option<Language> {
    if WORD_LIKE_CODES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(word.trim()))
    {
        return None;
    }
    Language::from_name_or_code(word)
}

/// Extract the span to translate and the requested target language.
///
/// Returns `None` when the message does not contain a usable request (for
/// example "can you translate?" with nothing to translate).
pub fn parse_translation_request(message: &str) -> Option<TranslationRequest> {
    let message = message.trim();

    if let Some(caps) = colon_form().captures(message) {
        let text = clean_span(&caps[2]);
        if !text.is_empty() {
            return Some(TranslationRequest {
                text,
                target: find_target_language(&caps[1]),
            });
        }
    }

    if let Some(caps) = trailing_target().captures(message) {
        if let Some(target) = target_word(&caps[2]) {
            let text = clean_span(&caps[1]);
            if !text.is_empty() {
                return Some(TranslationRequest {
                    text,
                    target: Some(target),
                });
            }
        }
    }

    if let Some(caps) = leading_target().captures(message) {
        if let Some(target) = target_word(&caps[1]) {
            let text = clean_span(&caps[2]);
            if !text.is_empty() {
                return Some(TranslationRequest {
                    text,
                    target: Some(target),
                });
            }
        }
    }

    let caps = bare_translate().captures(message)?;
    let text = clean_span(&caps[1]);
    if text.is_empty() {
        return None;
    }
    if let Some(rest) = only_target().captures(&text) {
        if target_word(&rest[1]).is_some() {
            return None;
        }
    }
    Some(TranslationRequest {
        target: find_target_language(message),
        text,
    })
}

/// Language named after to/into/in, else the first supported language name
/// mentioned anywhere.
fn find_target_language(text: &str) -> Option<Language> {
    target_after_preposition()
        .captures_iter(text)
        .find_map(|caps| target_word(&caps[1]))
        .or_else(|| {
            word()
                .find_iter(text)
                .filter(|m| m.as_str().chars().count() > 2)
                .find_map(|m| Language::from_name_or_code(m.as_str()))
        })
}

fn clean_span(span: &str) -> String {
    span.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’'))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Precedence Tests ====================

    #[test]
    fn test_translate_request_is_translation() {
        assert_eq!(classify("translate hello to spanish"), QueryIntent::Translation);
    }

    #[test]
    fn test_translation_beats_question_mark() {
        assert_eq!(
            classify("how to say thank you in french?"),
            QueryIntent::Translation
        );
    }

    #[test]
    fn test_hi_is_greeting() {
        assert_eq!(classify("hi"), QueryIntent::Greeting);
        assert_eq!(classify("good morning!"), QueryIntent::Greeting);
    }

    #[test]
    fn test_long_greeting_is_not_greeting() {
        assert_eq!(
            classify("hello there my good friend how are you"),
            QueryIntent::General
        );
    }

    #[test]
    fn test_long_greeting_with_question_is_question() {
        assert_eq!(
            classify("hello there, what is the capital of peru?"),
            QueryIntent::GeneralQuestion
        );
    }

    #[test]
    fn test_difference_question() {
        assert_eq!(
            classify("what is the difference between x and y?"),
            QueryIntent::GeneralQuestion
        );
    }

    #[test]
    fn test_sdg_beats_help() {
        assert_eq!(
            classify("help me understand inequality"),
            QueryIntent::SdgEquality
        );
    }

    #[test]
    fn test_help_info() {
        assert_eq!(classify("what can you do"), QueryIntent::HelpInfo);
    }

    #[test]
    fn test_help_beats_greeting() {
        assert_eq!(classify("hi, help"), QueryIntent::HelpInfo);
    }

    #[test]
    fn test_language_culture() {
        assert_eq!(
            classify("is japanese politeness hard to learn"),
            QueryIntent::LanguageCulture
        );
    }

    #[test]
    fn test_technology_is_general_question() {
        assert_eq!(classify("machine learning for farmers"), QueryIntent::GeneralQuestion);
    }

    #[test]
    fn test_ai_does_not_match_inside_words() {
        assert_eq!(classify("she said it was fine"), QueryIntent::General);
    }

    #[test]
    fn test_inflected_keyword_is_translation() {
        assert_eq!(
            classify("i translated this letter, is it correct"),
            QueryIntent::Translation
        );
    }

    #[test]
    fn test_plain_statement_is_general() {
        assert_eq!(classify("i went to the market today"), QueryIntent::General);
    }

    #[test]
    fn test_intent_labels() {
        assert_eq!(QueryIntent::SdgEquality.to_string(), "sdg_equality");
        assert_eq!(
            serde_json::to_string(&QueryIntent::GeneralQuestion).unwrap(),
            "\"general_question\""
        );
    }

    // ==================== Translation Request Parsing ====================

    #[test]
    fn test_parse_trailing_target() {
        let request = parse_translation_request("Translate hello to Spanish").unwrap();
        assert_eq!(request.text, "hello");
        assert_eq!(request.target, Some(Language::SPANISH));
    }

    #[test]
    fn test_parse_keeps_inner_prepositions() {
        let request =
            parse_translation_request("translate I want to go home into French").unwrap();
        assert_eq!(request.text, "I want to go home");
        assert_eq!(request.target, Some(Language::FRENCH));
    }

    #[test]
    fn test_parse_how_to_say() {
        let request = parse_translation_request("How to say 'thank you' in Japanese?").unwrap();
        assert_eq!(request.text, "thank you");
        assert_eq!(request.target.map(|l| l.code()), Some("ja"));
    }

    #[test]
    fn test_parse_colon_form() {
        let request =
            parse_translation_request("Convert this text to French: where is the library").unwrap();
        assert_eq!(request.text, "where is the library");
        assert_eq!(request.target, Some(Language::FRENCH));
    }

    #[test]
    fn test_parse_leading_target() {
        let request = parse_translation_request("translate to spanish good night").unwrap();
        assert_eq!(request.text, "good night");
        assert_eq!(request.target, Some(Language::SPANISH));
    }

    #[test]
    fn test_parse_target_by_code() {
        let request = parse_translation_request("translate good night to es").unwrap();
        assert_eq!(request.target, Some(Language::SPANISH));
    }

    #[test]
    fn test_parse_without_language() {
        let request = parse_translation_request("translate good night").unwrap();
        assert_eq!(request.text, "good night");
        assert_eq!(request.target, None);
    }

    #[test]
    fn test_parse_nothing_to_translate() {
        assert_eq!(parse_translation_request("can you translate"), None);
        assert_eq!(parse_translation_request("what does it mean"), None);
    }

    #[test]
    fn test_parse_target_only_is_not_a_request() {
        assert_eq!(parse_translation_request("translate to spanish"), None);
        assert_eq!(parse_translation_request("Translate into French."), None);
        assert_eq!(parse_translation_request("translate to es"), None);
    }

    #[test]
    fn test_parse_english_words_are_not_codes() {
        let request = parse_translation_request("translate welcome to it").unwrap();
        assert_eq!(request.text, "welcome to it");
        assert_eq!(request.target, None);

        let request = parse_translation_request("translate I'm used to it").unwrap();
        assert_eq!(request.target, None);

        let request = parse_translation_request("how to say hi in Hindi").unwrap();
        assert_eq!(request.text, "hi");
        assert_eq!(request.target.map(|l| l.code()), Some("hi"));
    }

    #[test]
    fn test_parse_word_like_code_falls_back_to_named_language() {
        let request = parse_translation_request("translate I'm used to it in Italian").unwrap();
        assert_eq!(request.text, "I'm used to it");
        assert_eq!(request.target.map(|l| l.code()), Some("it"));
    }
}
