//! Prompt construction for the local LLM.
//!
//! Everything here is pure string assembly so prompts can be asserted on
//! directly in tests.

use crate::classifier::QueryIntent;
use crate::linguistics::LinguisticProfile;

const PERSONA: &str = "You are a Universal Language Support Assistant with deep expertise in \
linguistics, cultural nuances, and cross-cultural communication. You promote equality and reduce \
barriers (SDG 10) through accurate, culturally-sensitive responses.";

/// Build the instruction block for a chat message.
///
/// `target_language_name` is the language the user will read the reply in.
/// The model always answers in English; non-English replies are translated
/// afterwards.
pub fn compose(
    message: &str,
    intent: QueryIntent,
    profile: &LinguisticProfile,
    target_language_name: &str,
) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(PERSONA);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("{}: \"{}\"\n\n", message_label(intent), message));
    prompt.push_str(&profile_block(profile));
    prompt.push('\n');
    prompt.push_str(checklist_heading(intent));
    prompt.push('\n');
    for (i, item) in checklist(intent, profile).iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, item));
    }

    if !target_language_name.eq_ignore_ascii_case("english") {
        prompt.push('\n');
        prompt.push_str(&audience_block(target_language_name));
    }

    prompt.push('\n');
    prompt.push_str(closing(intent));
    prompt
}

/// Build the LLM-assisted translation instruction.
pub fn contextual_translation_prompt(
    text: &str,
    profile: &LinguisticProfile,
    source_language_name: Option<&str>,
    target_language_name: &str,
) -> String {
    format!(
        r#"Translate the following text from {source} to {target}.

IMPORTANT CONSIDERATIONS:
- Formality level: {formality}
- Contains idioms: {idioms}
- Cultural references: {cultural}
- Sentiment: {sentiment}
- Grammar complexity: {grammar}

TRANSLATION GUIDELINES:
1. Preserve the formality level ({formality})
2. If idioms are present, provide culturally appropriate equivalents in {target}
3. Adapt cultural references to {target} context when appropriate
4. Maintain the emotional tone ({sentiment})
5. Preserve the meaning while adapting to natural {target} word order

Text to translate: "{text}"

Provide ONLY the translation, nothing else."#,
        source = source_language_name.unwrap_or("auto-detected language"),
        target = target_language_name,
        formality = profile.formality,
        idioms = profile.has_idioms,
        cultural = profile.has_cultural_references,
        sentiment = profile.sentiment,
        grammar = profile.grammar_complexity,
        text = text,
    )
}

fn profile_block(profile: &LinguisticProfile) -> String {
    format!(
        "LINGUISTIC ANALYSIS:\n\
         - Formality level: {}\n\
         - Contains idioms: {}\n\
         - Cultural references: {}\n\
         - Sentiment: {}\n\
         - Grammar complexity: {}\n",
        profile.formality,
        profile.has_idioms,
        profile.has_cultural_references,
        profile.sentiment,
        profile.grammar_complexity
    )
}

fn audience_block(language_name: &str) -> String {
    format!(
        "AUDIENCE:\n\
         - The user is communicating in {lang}\n\
         - Write your reply in English; it will be automatically translated to {lang}\n\
         - Understand the cultural context of {lang} speakers and respect their norms\n",
        lang = language_name
    )
}

fn message_label(intent: QueryIntent) -> &'static str {
    match intent {
        QueryIntent::Translation => "User needs translation help",
        QueryIntent::SdgEquality => "User asking about equality/SDG topics",
        QueryIntent::HelpInfo => "User wants to know capabilities",
        QueryIntent::Greeting => "User greeting",
        QueryIntent::LanguageCulture => "User asking about language/culture",
        QueryIntent::GeneralQuestion => "User question",
        QueryIntent::General => "User message",
    }
}

fn checklist_heading(intent: QueryIntent) -> &'static str {
    match intent {
        QueryIntent::Translation => "PROVIDE COMPREHENSIVE TRANSLATION ASSISTANCE:",
        QueryIntent::SdgEquality => "PROVIDE COMPREHENSIVE INFORMATION ABOUT:",
        QueryIntent::HelpInfo => "EXPLAIN THESE FEATURES:",
        QueryIntent::Greeting => "RESPOND APPROPRIATELY:",
        QueryIntent::LanguageCulture => "PROVIDE EXPERT INFORMATION ABOUT:",
        QueryIntent::GeneralQuestion => "PROVIDE A COMPREHENSIVE ANSWER:",
        QueryIntent::General => "PROVIDE A THOUGHTFUL RESPONSE:",
    }
}

fn checklist(intent: QueryIntent, profile: &LinguisticProfile) -> Vec<String> {
    let items: &[&str] = match intent {
        QueryIntent::Translation => &[
            "If a specific translation is requested, provide an accurate translation",
            "Explain idioms and give cultural equivalents rather than literal translations",
            "Preserve the formality level and politeness markers",
            "Flag and explain any cultural adaptation you make",
            "Handle ambiguities by providing context",
            "Maintain sentiment and tone appropriately",
            "Suggest alternative phrasings for better cultural fit",
        ],
        QueryIntent::SdgEquality => &[
            "SDG 10 (Reducing Inequalities) with specific examples",
            "How language barriers contribute to inequality",
            "Real-world applications and success stories",
            "Practical steps for promoting equality",
            "Cultural sensitivity in global communication",
            "Economic and social impacts of language accessibility",
        ],
        QueryIntent::HelpInfo => &[
            "Advanced translation with idiom handling and cultural adaptation",
            "Formality level preservation (formal/informal/neutral)",
            "Cultural reference localization",
            "Sentiment and tone preservation",
            "Grammar and word order adjustments",
            "Ambiguity resolution with context",
            "Voice input with multilingual speech recognition",
            "File translation with structure preservation",
        ],
        QueryIntent::Greeting => {
            return vec![
                format!("Match their formality level ({})", profile.formality),
                "Be culturally appropriate and warm".to_string(),
                "Briefly introduce your translation and language capabilities".to_string(),
                "Ask how you can help with translation or language questions".to_string(),
            ];
        }
        QueryIntent::LanguageCulture => &[
            "Linguistic nuances and cultural contexts",
            "Translation challenges (idioms, formality, cultural references)",
            "Cross-cultural communication best practices",
            "Politeness systems across languages",
            "Regional variations and dialects",
        ],
        QueryIntent::GeneralQuestion => &[
            "Answer the specific question directly and accurately",
            "Include relevant examples and practical information",
            "Consider cultural context when appropriate",
            "Use appropriate technical depth for the question",
            "Be thorough but concise",
        ],
        QueryIntent::General => &[
            "Address the message thoroughly and relevantly",
            "Consider linguistic and cultural nuances",
            "Provide practical, actionable information",
            "Ask clarifying questions if the request is ambiguous",
            "Connect to language accessibility and equality when appropriate",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

fn closing(intent: QueryIntent) -> &'static str {
    match intent {
        QueryIntent::Translation => "Be precise, culturally aware, and linguistically accurate.",
        QueryIntent::SdgEquality => "Be factual, inspiring, and actionable with concrete examples.",
        QueryIntent::HelpInfo => {
            "Provide specific examples of complex linguistic challenges you can handle."
        }
        QueryIntent::Greeting => "Keep it short and friendly.",
        QueryIntent::LanguageCulture => {
            "Be educational, culturally sensitive, and linguistically precise."
        }
        QueryIntent::GeneralQuestion => "Focus on being helpful, accurate, and educational.",
        QueryIntent::General => "Be genuinely helpful, culturally aware, and linguistically sophisticated.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistics::analyze;

    #[test]
    fn test_compose_is_deterministic() {
        let profile = analyze("Translate break a leg to French");
        let a = compose("Translate break a leg to French", QueryIntent::Translation, &profile, "English");
        let b = compose("Translate break a leg to French", QueryIntent::Translation, &profile, "English");
        assert_eq!(a, b);
    }

    #[test]
    fn test_translation_prompt_golden() {
        let profile = analyze("hello");
        let prompt = compose("hello", QueryIntent::Translation, &profile, "English");
        let expected = format!(
            "{}\n\nUser needs translation help: \"hello\"\n\n\
             LINGUISTIC ANALYSIS:\n\
             - Formality level: neutral\n\
             - Contains idioms: false\n\
             - Cultural references: false\n\
             - Sentiment: neutral\n\
             - Grammar complexity: simple\n\
             \nPROVIDE COMPREHENSIVE TRANSLATION ASSISTANCE:\n\
             1. If a specific translation is requested, provide an accurate translation\n\
             2. Explain idioms and give cultural equivalents rather than literal translations\n\
             3. Preserve the formality level and politeness markers\n\
             4. Flag and explain any cultural adaptation you make\n\
             5. Handle ambiguities by providing context\n\
             6. Maintain sentiment and tone appropriately\n\
             7. Suggest alternative phrasings for better cultural fit\n\
             \nBe precise, culturally aware, and linguistically accurate.",
            PERSONA
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_prompt_embeds_profile() {
        let profile = analyze("Could you kindly help, sir? It's raining cats and dogs");
        let prompt = compose("msg", QueryIntent::General, &profile, "English");
        assert!(prompt.contains("- Formality level: formal"));
        assert!(prompt.contains("- Contains idioms: true"));
    }

    #[test]
    fn test_greeting_matches_formality() {
        let profile = analyze("hey yo");
        let prompt = compose("hey yo", QueryIntent::Greeting, &profile, "English");
        assert!(prompt.contains("User greeting: \"hey yo\""));
        assert!(prompt.contains("Match their formality level (informal)"));
    }

    #[test]
    fn test_each_intent_has_distinct_heading() {
        let profile = analyze("");
        let intents = [
            QueryIntent::Translation,
            QueryIntent::SdgEquality,
            QueryIntent::HelpInfo,
            QueryIntent::Greeting,
            QueryIntent::LanguageCulture,
            QueryIntent::GeneralQuestion,
            QueryIntent::General,
        ];
        let mut prompts: Vec<String> = intents
            .iter()
            .map(|i| compose("x", *i, &profile, "English"))
            .collect();
        prompts.dedup();
        assert_eq!(prompts.len(), intents.len());
    }

    #[test]
    fn test_non_english_target_adds_audience_block() {
        let profile = analyze("hola");
        let prompt = compose("hola", QueryIntent::Greeting, &profile, "Spanish");
        assert!(prompt.contains("The user is communicating in Spanish"));
        assert!(prompt.contains("automatically translated to Spanish"));

        let english = compose("hola", QueryIntent::Greeting, &profile, "English");
        assert!(!english.contains("AUDIENCE"));
    }

    #[test]
    fn test_contextual_translation_prompt() {
        let profile = analyze("Please, it's a piece of cake");
        let prompt = contextual_translation_prompt(
            "Please, it's a piece of cake",
            &profile,
            Some("English"),
            "German",
        );
        assert!(prompt.starts_with("Translate the following text from English to German."));
        assert!(prompt.contains("- Contains idioms: true"));
        assert!(prompt.contains("Preserve the formality level (formal)"));
        assert!(prompt.contains("Text to translate: \"Please, it's a piece of cake\""));
        assert!(prompt.ends_with("Provide ONLY the translation, nothing else."));
    }

    #[test]
    fn test_contextual_translation_prompt_unknown_source() {
        let profile = analyze("x");
        let prompt = contextual_translation_prompt("x", &profile, None, "Hindi");
        assert!(prompt.contains("from auto-detected language to Hindi"));
    }
}
