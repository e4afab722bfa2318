//! Language registry: Single source of truth for all supported languages.
//!
//! The registry is built once behind a `OnceLock` and never mutated, so it can
//! be shared freely between request handlers.

use crate::i18n::strings::{ENGLISH_STRINGS, FRENCH_STRINGS, HINDI_STRINGS, SPANISH_STRINGS};
use crate::i18n::LanguageStrings;
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "es", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Spanish", "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Español", "Français")
    pub native_name: &'static str,

    /// Whether this is the canonical language the assistant reasons in
    pub is_canonical: bool,

    /// Localized canned replies; `None` means English strings are used
    pub strings: Option<&'static LanguageStrings>,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code (case-insensitive).
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        let code = code.trim();
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    /// Get a language configuration by its English or native name (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&LanguageConfig> {
        let name = name.trim();
        self.languages.iter().find(|lang| {
            lang.name.eq_ignore_ascii_case(name) || lang.native_name.to_lowercase() == name.to_lowercase()
        })
    }

    /// All supported languages in registry order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Supported language codes in registry order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.languages.iter().map(|lang| lang.code).collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one canonical language.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Check if a language code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

fn language(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    strings: Option<&'static LanguageStrings>,
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
        is_canonical: code == "en",
        strings,
    }
}

/// Default language configurations.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        language("en", "English", "English", Some(&ENGLISH_STRINGS)),
        language("es", "Spanish", "Español", Some(&SPANISH_STRINGS)),
        language("fr", "French", "Français", Some(&FRENCH_STRINGS)),
        language("de", "German", "Deutsch", None),
        language("hi", "Hindi", "हिन्दी", Some(&HINDI_STRINGS)),
        language("te", "Telugu", "తెలుగు", None),
        language("mr", "Marathi", "मराठी", None),
        language("kn", "Kannada", "ಕನ್ನಡ", None),
        language("gu", "Gujarati", "ગુજરાતી", None),
        language("ta", "Tamil", "தமிழ்", None),
        language("ml", "Malayalam", "മലയാളം", None),
        language("pa", "Punjabi", "ਪੰਜਾਬੀ", None),
        language("ar", "Arabic", "العربية", None),
        language("zh", "Chinese", "中文", None),
        language("ja", "Japanese", "日本語", None),
        language("ko", "Korean", "한국어", None),
        language("pt", "Portuguese", "Português", None),
        language("ru", "Russian", "Русский", None),
        language("it", "Italian", "Italiano", None),
    ]
}
