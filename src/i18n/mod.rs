//! Internationalization (i18n) module for multi-language support.
//!
//! - `registry`: Single source of truth for all supported languages
//! - `language`: Type-safe `Language` validated against the registry
//! - `strings`: Localized canned replies used when the LLM is unavailable
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Language, LanguageRegistry};
//!
//! let spanish = Language::from_code("es")?;
//! let codes = LanguageRegistry::get().codes();
//! ```

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{LanguageStrings, ENGLISH_STRINGS};
