//! Translation adapter: engine client, language detection and long-text
//! chunking.

use crate::i18n::{Language, LanguageRegistry};
use crate::linguistics::analyze;
use crate::ollama::{GenerationOptions, OllamaClient};
use crate::prompts::contextual_translation_prompt;
use crate::retry::{with_retry_if, RetryConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Texts longer than this many characters are translated in chunks
pub const MAX_CHUNK_CHARS: usize = 4000;

/// Source language value meaning "detect it"
pub const AUTO: &str = "auto";

const IDIOM_NOTE: &str = "Note: This text contains idioms that may not translate literally.";
const CULTURAL_NOTE: &str =
    "Note: This text contains cultural references that may need localization.";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("translation engine returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("translation engine unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed translation engine response: {0}")]
    Malformed(String),
}

impl EngineError {
    /// Rate limits, server errors and network problems are worth retrying
    pub fn is_transient(&self) -> bool {
        match self {
            EngineError::Status { status, .. } => *status == 429 || *status >= 500,
            EngineError::Transport(_) => true,
            EngineError::Malformed(_) => false,
        }
    }
}

/// Machine translation backend.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, EngineError>;
}

/// Language identification for free text.
pub trait LanguageDetector: Send + Sync {
    /// ISO 639-1 code of a supported language, or `None`
    fn detect(&self, text: &str) -> Option<&'static str>;
}

// ============================================================================
// LibreTranslate
// ============================================================================

#[derive(Debug, Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
#[derive(Debug, Clone)]
pub struct LibreTranslateEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl LibreTranslateEngine {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl TranslationEngine for LibreTranslateEngine {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EngineError> {
        let request = LibreTranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: LibreTranslateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Malformed(e.to_string()))?;

        parsed
            .translated_text
            .ok_or_else(|| EngineError::Malformed("missing translatedText".to_string()))
    }
}

// ============================================================================
// whatlang
// ============================================================================

/// Offline trigram detector restricted to the supported languages.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<&'static str> {
        use whatlang::Lang;

        let info = whatlang::detect(text)?;
        let code = match info.lang() {
            Lang::Eng => "en",
            Lang::Spa => "es",
            Lang::Fra => "fr",
            Lang::Deu => "de",
            Lang::Hin => "hi",
            Lang::Tel => "te",
            Lang::Mar => "mr",
            Lang::Kan => "kn",
            Lang::Guj => "gu",
            Lang::Tam => "ta",
            Lang::Mal => "ml",
            Lang::Pan => "pa",
            Lang::Ara => "ar",
            Lang::Cmn => "zh",
            Lang::Jpn => "ja",
            Lang::Kor => "ko",
            Lang::Por => "pt",
            Lang::Rus => "ru",
            Lang::Ita => "it",
            _ => return None,
        };
        Some(code)
    }
}

// ============================================================================
// Translator
// ============================================================================

/// Result of a translation attempt. Always has displayable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Source and target were the same; no engine call was made
    Unchanged(String),
    Translated(String),
    /// Engine failure, carrying a "Translation failed: ..." description
    Failed(String),
}

impl Translation {
    pub fn text(&self) -> &str {
        match self {
            Translation::Unchanged(text)
            | Translation::Translated(text)
            | Translation::Failed(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Translation::Unchanged(text)
            | Translation::Translated(text)
            | Translation::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Translation::Failed(_))
    }
}

/// Translation facade combining an engine, a detector and retry policy.
#[derive(Clone)]
pub struct Translator {
    engine: Arc<dyn TranslationEngine>,
    detector: Arc<dyn LanguageDetector>,
    retry: RetryConfig,
}

impl Translator {
    pub fn new(engine: Arc<dyn TranslationEngine>, detector: Arc<dyn LanguageDetector>) -> Self {
        Self {
            engine,
            detector,
            retry: RetryConfig::translation_engine(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Supported language code of `text`, defaulting to English.
    pub fn detect_language(&self, text: &str) -> &'static str {
        match self.detector.detect(text) {
            Some(code) if LanguageRegistry::get().is_supported(code) => code,
            Some(code) => {
                debug!("Detected unsupported language {}, assuming en", code);
                Language::canonical().code()
            }
            None => Language::canonical().code(),
        }
    }

    /// Explicit source unless absent or "auto", else detected from `text`.
    pub fn resolve_source(&self, text: &str, source: Option<&str>) -> String {
        match source.map(str::trim) {
            Some(code) if !code.is_empty() && !code.eq_ignore_ascii_case(AUTO) => {
                code.to_lowercase()
            }
            _ => self.detect_language(text).to_string(),
        }
    }

    /// Translate `text` into `target`, appending idiom and cultural notes on
    /// success.
    pub async fn translate(&self, text: &str, target: &str, source: Option<&str>) -> Translation {
        let target = match supported_target(target) {
            Ok(code) => code,
            Err(failure) => return failure,
        };
        let source = self.resolve_source(text, source);
        if same_language(&source, target) {
            return Translation::Unchanged(text.to_string());
        }

        match self.call_engine(text, &source, target).await {
            Ok(translated) => Translation::Translated(with_notes(translated, text)),
            Err(failure) => failure,
        }
    }

    /// Translate without idiom or cultural notes, for text that is processed
    /// further rather than shown to the user.
    pub async fn translate_plain(&self, text: &str, target: &str, source: &str) -> Translation {
        let target = match supported_target(target) {
            Ok(code) => code,
            Err(failure) => return failure,
        };
        if same_language(source, target) {
            return Translation::Unchanged(text.to_string());
        }
        match self.call_engine(text, source, target).await {
            Ok(translated) => Translation::Translated(translated),
            Err(failure) => failure,
        }
    }

    /// Like `translate`, but splits texts over `MAX_CHUNK_CHARS` on blank
    /// lines and translates the chunks in order.
    pub async fn translate_long(
        &self,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> Translation {
        if text.chars().count() <= MAX_CHUNK_CHARS {
            return self.translate(text, target, source).await;
        }

        let target = match supported_target(target) {
            Ok(code) => code,
            Err(failure) => return failure,
        };
        let source = self.resolve_source(text, source);
        if same_language(&source, target) {
            return Translation::Unchanged(text.to_string());
        }

        let chunks = chunk_paragraphs(text, MAX_CHUNK_CHARS);
        debug!("Translating {} chunks into {}", chunks.len(), target);

        let mut parts = Vec::with_capacity(chunks.len());
        let mut failures = 0;
        for chunk in &chunks {
            match self.call_engine(chunk, &source, target).await {
                Ok(translated) => parts.push(translated),
                Err(failure) => {
                    failures += 1;
                    parts.push(failure.into_text());
                }
            }
        }

        let joined = parts.join("\n\n");
        if failures == chunks.len() {
            Translation::Failed(joined)
        } else {
            Translation::Translated(with_notes(joined, text))
        }
    }

    /// Translate with LLM help when a literal translation would likely lose
    /// meaning (idioms, cultural references, marked formality).
    pub async fn translate_with_context(
        &self,
        llm: &OllamaClient,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> Translation {
        let target = match supported_target(target) {
            Ok(code) => code,
            Err(failure) => return failure,
        };
        let source = self.resolve_source(text, source);
        if same_language(&source, target) {
            return Translation::Unchanged(text.to_string());
        }

        let profile = analyze(text);
        if profile.needs_contextual_translation() {
            let source_name = Language::from_code(&source).ok().map(|l| l.name());
            let target_name = Language::from_code(target)
                .map(|l| l.name())
                .unwrap_or(target);
            let prompt = contextual_translation_prompt(text, &profile, source_name, target_name);

            if let Some(translated) = llm
                .generate(&prompt, &GenerationOptions::translation())
                .await
                .into_text()
            {
                return Translation::Translated(translated);
            }
            debug!("Contextual translation unusable, falling back to engine");
        }

        self.translate(text, target, Some(&source)).await
    }

    /// Engine call with retries. The error side is already a `Failed`.
    async fn call_engine(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, Translation> {
        let engine = &self.engine;
        with_retry_if(
            &self.retry,
            "translate",
            || engine.translate(text, source, target),
            EngineError::is_transient,
        )
        .await
        .map_err(|e| {
            warn!("Translation {} -> {} failed: {}", source, target, e);
            Translation::Failed(format!("Translation failed: {}", e))
        })
    }
}

/// Registry code for `target`. Anything outside the registry, including
/// "auto", fails before reaching the engine.
fn supported_target(target: &str) -> Result<&'static str, Translation> {
    Language::from_code(target).map(|language| language.code()).map_err(|_| {
        warn!("Refusing to translate into unsupported language '{}'", target);
        Translation::Failed(format!(
            "Translation failed: unsupported target language '{}'",
            target.trim()
        ))
    })
}

fn same_language(source: &str, target: &str) -> bool {
    source.trim().eq_ignore_ascii_case(target.trim())
}

fn with_notes(mut translated: String, original: &str) -> String {
    let profile = analyze(original);
    let mut notes = Vec::new();
    if profile.has_idioms {
        notes.push(IDIOM_NOTE);
    }
    if profile.has_cultural_references {
        notes.push(CULTURAL_NOTE);
    }
    if !notes.is_empty() {
        translated.push_str("\n\n");
        translated.push_str(&notes.join(" "));
    }
    translated
}

/// Greedily pack blank-line separated paragraphs into chunks of at most
/// `limit` characters. A paragraph longer than `limit` becomes its own chunk.
pub fn chunk_paragraphs(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for paragraph in text.split("\n\n") {
        let paragraph_len = paragraph.chars().count();
        if current_len + paragraph_len + 2 <= limit {
            current.push_str(paragraph);
            current.push_str("\n\n");
            current_len += paragraph_len + 2;
        } else {
            push_chunk(&mut chunks, &current);
            current = format!("{}\n\n", paragraph);
            current_len = paragraph_len + 2;
        }
    }
    push_chunk(&mut chunks, &current);

    chunks
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Engine that uppercases text and records every call
    #[derive(Default)]
    struct FakeEngine {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
        fail_with: Option<u16>,
    }

    #[async_trait]
    impl TranslationEngine for FakeEngine {
        async fn translate(
            &self,
            text: &str,
            _source: &str,
            _target: &str,
        ) -> Result<String, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(text.to_string());
            match self.fail_with {
                Some(status) => Err(EngineError::Status {
                    status,
                    body: "boom".to_string(),
                }),
                None => Ok(text.to_uppercase()),
            }
        }
    }

    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<&'static str> {
            self.0
        }
    }

    fn translator(engine: Arc<FakeEngine>) -> Translator {
        Translator::new(engine, Arc::new(FixedDetector(Some("en"))))
            .with_retry(RetryConfig::new(3, Duration::from_millis(1)))
    }

    // ==================== Identity ====================

    #[tokio::test]
    async fn test_same_language_makes_no_calls() {
        let engine = Arc::new(FakeEngine::default());
        let result = translator(engine.clone())
            .translate("Bonjour", "fr", Some("fr"))
            .await;

        assert_eq!(result, Translation::Unchanged("Bonjour".to_string()));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_detected_source_equal_to_target_makes_no_calls() {
        let engine = Arc::new(FakeEngine::default());
        let result = translator(engine.clone())
            .translate("Good morning", "en", None)
            .await;

        assert!(matches!(result, Translation::Unchanged(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    // ==================== Notes ====================

    #[tokio::test]
    async fn test_idiom_note_appended() {
        let engine = Arc::new(FakeEngine::default());
        let result = translator(engine)
            .translate("Break a leg tonight", "es", Some("en"))
            .await;

        assert_eq!(
            result.text(),
            format!("BREAK A LEG TONIGHT\n\n{}", IDIOM_NOTE)
        );
    }

    #[tokio::test]
    async fn test_both_notes_on_one_line() {
        let engine = Arc::new(FakeEngine::default());
        let result = translator(engine)
            .translate("It's raining cats and dogs on Thanksgiving", "de", Some("en"))
            .await;

        assert!(result
            .text()
            .ends_with(&format!("\n\n{} {}", IDIOM_NOTE, CULTURAL_NOTE)));
    }

    #[tokio::test]
    async fn test_plain_text_has_no_notes() {
        let engine = Arc::new(FakeEngine::default());
        let result = translator(engine).translate("Hello", "es", Some("en")).await;
        assert_eq!(result, Translation::Translated("HELLO".to_string()));
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn test_engine_failure_is_reported_not_raised() {
        let engine = Arc::new(FakeEngine {
            fail_with: Some(400),
            ..Default::default()
        });
        let result = translator(engine.clone())
            .translate("Hello", "es", Some("en"))
            .await;

        assert!(result.is_failed());
        assert!(result.text().starts_with("Translation failed: "));
        // 400 is not transient
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_target_makes_no_calls() {
        let engine = Arc::new(FakeEngine::default());
        let translator = translator(engine.clone());

        let result = translator.translate("hello world", "xx", Some("en")).await;
        assert_eq!(
            result,
            Translation::Failed("Translation failed: unsupported target language 'xx'".to_string())
        );

        assert!(translator.translate("hello world", "auto", None).await.is_failed());
        assert!(translator.translate_plain("hello world", "xx", "en").await.is_failed());

        let long = vec!["word ".repeat(200); 6].join("\n\n");
        assert!(translator.translate_long(&long, "xx", Some("en")).await.is_failed());

        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_target_code_is_normalized() {
        let engine = Arc::new(FakeEngine::default());
        let result = translator(engine.clone())
            .translate("Bonjour", " FR ", Some("fr"))
            .await;

        assert!(matches!(result, Translation::Unchanged(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let engine = Arc::new(FakeEngine {
            fail_with: Some(503),
            ..Default::default()
        });
        let result = translator(engine.clone())
            .translate("Hello", "es", Some("en"))
            .await;

        assert!(result.is_failed());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_transient_classification() {
        let status = |status| EngineError::Status {
            status,
            body: String::new(),
        };
        assert!(status(429).is_transient());
        assert!(status(502).is_transient());
        assert!(!status(400).is_transient());
        assert!(!EngineError::Malformed("x".to_string()).is_transient());
    }

    // ==================== Detection ====================

    #[test]
    fn test_detect_language_defaults_to_english() {
        let engine = Arc::new(FakeEngine::default());
        let none = Translator::new(engine.clone(), Arc::new(FixedDetector(None)));
        assert_eq!(none.detect_language("???"), "en");

        let unsupported = Translator::new(engine, Arc::new(FixedDetector(Some("sw"))));
        assert_eq!(unsupported.detect_language("habari"), "en");
    }

    #[test]
    fn test_resolve_source_auto_detects() {
        let engine = Arc::new(FakeEngine::default());
        let t = Translator::new(engine, Arc::new(FixedDetector(Some("fr"))));
        assert_eq!(t.resolve_source("x", Some("auto")), "fr");
        assert_eq!(t.resolve_source("x", None), "fr");
        assert_eq!(t.resolve_source("x", Some("ES")), "es");
    }

    #[test]
    fn test_whatlang_detector_on_full_sentences() {
        let detector = WhatlangDetector;
        assert_eq!(
            detector.detect("Where is the train station? I would like to buy a ticket to the city."),
            Some("en")
        );
        assert_eq!(
            detector.detect("¿Dónde está la estación de tren? Quiero comprar un billete para la ciudad."),
            Some("es")
        );
        assert_eq!(detector.detect(""), None);
    }

    // ==================== Long Text ====================

    #[tokio::test]
    async fn test_translate_long_short_text_matches_translate() {
        let engine = Arc::new(FakeEngine::default());
        let t = translator(engine);
        let text = "First paragraph.\n\nSecond paragraph.";
        assert_eq!(
            t.translate_long(text, "es", Some("en")).await,
            t.translate(text, "es", Some("en")).await
        );
    }

    #[tokio::test]
    async fn test_translate_long_preserves_order() {
        let engine = Arc::new(FakeEngine::default());
        let t = translator(engine.clone());
        let paragraphs: Vec<String> = (0..6)
            .map(|i| format!("paragraph {} {}", i, "x".repeat(1500)))
            .collect();
        let text = paragraphs.join("\n\n");

        let result = t.translate_long(&text, "es", Some("en")).await;

        let calls = engine.calls.load(Ordering::SeqCst);
        assert!(calls > 1);
        let expected: Vec<String> = paragraphs.iter().map(|p| p.to_uppercase()).collect();
        assert_eq!(result.text(), expected.join("\n\n"));
        for chunk in engine.seen.lock().unwrap().iter() {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
        }
    }

    // ==================== Chunking ====================

    #[test]
    fn test_chunk_oversized_paragraph_is_own_chunk() {
        let big = "y".repeat(50);
        let text = format!("small\n\n{}\n\ntail", big);
        let chunks = chunk_paragraphs(&text, 20);
        assert_eq!(chunks, vec!["small".to_string(), big, "tail".to_string()]);
    }

    #[test]
    fn test_chunk_skips_blank_paragraphs() {
        assert!(chunk_paragraphs("\n\n   \n\n", 100).is_empty());
    }

    proptest! {
        #[test]
        fn prop_chunking_preserves_paragraph_order(
            paragraphs in prop::collection::vec("[a-z]{1,40}", 1..30),
            limit in 10usize..200,
        ) {
            let text = paragraphs.join("\n\n");
            let chunks = chunk_paragraphs(&text, limit);
            let rejoined: Vec<String> = chunks
                .iter()
                .flat_map(|c| c.split("\n\n").map(|s| s.to_string()))
                .collect();
            prop_assert_eq!(rejoined, paragraphs);
        }

        #[test]
        fn prop_chunking_is_idempotent(
            paragraphs in prop::collection::vec("[a-z ]{1,40}", 1..30),
            limit in 10usize..200,
        ) {
            let text = paragraphs.join("\n\n");
            for chunk in chunk_paragraphs(&text, limit) {
                prop_assert_eq!(chunk_paragraphs(&chunk, limit), vec![chunk.clone()]);
            }
        }
    }

    // ==================== LibreTranslate ====================

    #[tokio::test]
    async fn test_libretranslate_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(serde_json::json!({
                "q": "Hello",
                "source": "en",
                "target": "es",
                "format": "text",
                "api_key": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translatedText": "Hola"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let engine = LibreTranslateEngine::new(
            reqwest::Client::new(),
            &server.uri(),
            Some("secret".to_string()),
            Duration::from_secs(5),
        );
        assert_eq!(engine.translate("Hello", "en", "es").await.unwrap(), "Hola");
    }

    #[tokio::test]
    async fn test_libretranslate_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(400).set_body_string("xx is not supported"))
            .mount(&server)
            .await;

        let engine = LibreTranslateEngine::new(
            reqwest::Client::new(),
            &server.uri(),
            None,
            Duration::from_secs(5),
        );
        match engine.translate("Hello", "en", "xx").await {
            Err(EngineError::Status { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("not supported"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_libretranslate_missing_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let engine = LibreTranslateEngine::new(
            reqwest::Client::new(),
            &server.uri(),
            None,
            Duration::from_secs(5),
        );
        assert!(matches!(
            engine.translate("Hello", "en", "es").await,
            Err(EngineError::Malformed(_))
        ));
    }

    // ==================== Contextual ====================

    #[tokio::test]
    async fn test_contextual_translation_uses_llm_for_idioms() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "Es pan comido, de verdad."
            })))
            .mount(&server)
            .await;

        let engine = Arc::new(FakeEngine::default());
        let llm = OllamaClient::new(reqwest::Client::new(), &server.uri(), "llama3");
        let result = translator(engine.clone())
            .translate_with_context(&llm, "It's a piece of cake", "es", Some("en"))
            .await;

        assert_eq!(
            result,
            Translation::Translated("Es pan comido, de verdad.".to_string())
        );
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_contextual_translation_rejects_unsupported_target() {
        let engine = Arc::new(FakeEngine::default());
        let llm = OllamaClient::new(reqwest::Client::new(), "http://127.0.0.1:9", "phi");
        let result = translator(engine.clone())
            .translate_with_context(&llm, "It's a piece of cake", "xx", Some("en"))
            .await;

        assert!(result.is_failed());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_contextual_translation_falls_back_to_engine() {
        let engine = Arc::new(FakeEngine::default());
        let llm = OllamaClient::new(reqwest::Client::new(), "http://127.0.0.1:9", "phi");
        let result = translator(engine.clone())
            .translate_with_context(&llm, "It's a piece of cake", "es", Some("en"))
            .await;

        assert!(result.text().starts_with("IT'S A PIECE OF CAKE"));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }
}
