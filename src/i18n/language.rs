//! Language type: validated language representation backed by the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings, ENGLISH_STRINGS};
use anyhow::{bail, Result};

/// A supported language.
///
/// Only codes present in the registry can be turned into a `Language`, so
/// every value is a valid translation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "es")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const SPANISH: Language = Language { code: "es" };
    pub const FRENCH: Language = Language { code: "fr" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the registry
    /// * `Err` for unknown codes, including the `"auto"` sentinel
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Resolve a free-form word that is either a language name or code.
    pub fn from_name_or_code(word: &str) -> Option<Language> {
        let registry = LanguageRegistry::get();
        registry
            .get_by_name(word)
            .or_else(|| registry.get_by_code(word))
            .map(|config| Language { code: config.code })
    }

    /// Get the canonical language (English).
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for values built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    /// Canned replies for this language, falling back to English.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.config().strings.unwrap_or(&ENGLISH_STRINGS)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_canonical());
    }

    #[test]
    fn test_spanish_constant() {
        let spanish = Language::SPANISH;
        assert_eq!(spanish.code(), "es");
        assert_eq!(spanish.name(), "Spanish");
        assert!(!spanish.is_canonical());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        let language = Language::from_code("ko").expect("Should succeed");
        assert_eq!(language.name(), "Korean");
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("xx");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_auto_is_not_a_language() {
        assert!(Language::from_code("auto").is_err());
        assert!(Language::from_code("").is_err());
    }

    // ==================== from_name_or_code Tests ====================

    #[test]
    fn test_from_name_or_code_by_name() {
        assert_eq!(Language::from_name_or_code("Spanish"), Some(Language::SPANISH));
        assert_eq!(Language::from_name_or_code("french"), Some(Language::FRENCH));
    }

    #[test]
    fn test_from_name_or_code_by_code() {
        assert_eq!(Language::from_name_or_code("es"), Some(Language::SPANISH));
    }

    #[test]
    fn test_from_name_or_code_unknown() {
        assert_eq!(Language::from_name_or_code("morning"), None);
    }

    // ==================== Strings Tests ====================

    #[test]
    fn test_strings_fall_back_to_english() {
        let german = Language::from_code("de").unwrap();
        assert_eq!(german.strings().greeting, ENGLISH_STRINGS.greeting);
    }

    #[test]
    fn test_strings_localized_for_spanish() {
        assert!(Language::SPANISH.strings().greeting.starts_with("¡Hola"));
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::FRENCH.to_string(), "fr");
    }
}
