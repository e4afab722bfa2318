//! Request orchestration: chat, translation, file translation and speech.
//!
//! The assistant holds no per-request state. Each call detects, normalizes,
//! classifies and replies independently.

use crate::classifier::{classify, parse_translation_request, QueryIntent};
use crate::error::{ApiError, ApiResult};
use crate::files::{extract_text, file_type, preview, Extracted};
use crate::i18n::{Language, LanguageRegistry, LanguageStrings};
use crate::keywords::{
    mentions_any, FALLBACK_HELP, FALLBACK_QUESTION, FALLBACK_SDG, FALLBACK_TRANSLATION,
    GREETING_KEYWORDS,
};
use crate::linguistics::analyze;
use crate::ollama::{tidy_response, GenerationOptions, OllamaClient};
use crate::prompts::compose;
use crate::speech::{transcribe_base64, SpeechError, SpeechModel};
use crate::translation::{Translation, Translator, AUTO};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Characters of an upload used for language detection
const DETECTION_SAMPLE_CHARS: usize = 1000;
/// Characters of the original upload echoed back
const FILE_PREVIEW_CHARS: usize = 500;

const SPEECH_UNAVAILABLE: &str =
    "Speech recognition not available on server. Using browser recognition.";
const EMPTY_FILE: &str = "File appears to be empty or unreadable.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub detected_language: String,
    pub input_language: String,
    pub output_language: String,
    /// English original of a reply that was translated for the user
    pub translation: Option<String>,
    pub message_processed: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslateReply {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileTranslation {
    pub success: bool,
    pub original_filename: String,
    pub file_size: usize,
    pub file_type: String,
    pub detected_language: String,
    pub source_language: String,
    pub target_language: String,
    pub original_content: String,
    pub translated_content: String,
    pub char_count: usize,
    pub translated_char_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpeechReply {
    pub transcription: String,
    pub detected_language: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthReport {
    pub status: &'static str,
    pub ollama_connected: bool,
    pub supported_languages: Vec<&'static str>,
}

pub struct Assistant {
    translator: Translator,
    llm: OllamaClient,
    speech: Option<Arc<dyn SpeechModel>>,
}

impl Assistant {
    pub fn new(
        translator: Translator,
        llm: OllamaClient,
        speech: Option<Arc<dyn SpeechModel>>,
    ) -> Self {
        Self {
            translator,
            llm,
            speech,
        }
    }

    /// Ollama model answering chat messages
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Answer a chat message in the requested output language.
    pub async fn chat(&self, message: &str, input_language: &str, output_language: &str) -> ChatReply {
        let detected = self.translator.detect_language(message);
        let input = resolve_input_language(input_language, detected);

        let processed = if input != Language::canonical().code() {
            match self.translator.translate_plain(message, "en", &input).await {
                Translation::Failed(reason) => {
                    warn!("Keeping original message, normalization failed: {}", reason);
                    message.to_string()
                }
                normalized => normalized.into_text(),
            }
        } else {
            message.to_string()
        };

        let output = supported_output(output_language);
        let intent = classify(&processed.to_lowercase());
        debug!("Chat intent {} (input {}, output {})", intent, input, output_language);

        let mut reply = ChatReply {
            response: String::new(),
            detected_language: detected.to_string(),
            input_language: input,
            output_language: output_language.to_string(),
            translation: None,
            message_processed: processed.clone(),
        };

        if intent == QueryIntent::Translation {
            if let Some(request) = parse_translation_request(&processed) {
                let target = request.target.unwrap_or(output);
                let translated = self
                    .translator
                    .translate(&request.text, target.code(), None)
                    .await;
                reply.response = format!("Translation: {}", translated.text());
                return reply;
            }
        }

        let profile = analyze(&processed);
        let prompt = compose(&processed, intent, &profile, output.name());

        let generated = self
            .llm
            .generate(&prompt, &GenerationOptions::chat())
            .await
            .into_text()
            .and_then(|text| tidy_response(&text));

        let (english, localized) = match generated {
            Some(text) => (text, None),
            None => {
                info!("Using fallback reply for {} message", intent);
                let english = fallback_reply(&processed, Language::canonical().strings());
                let localized = output
                    .config()
                    .strings
                    .filter(|_| !output.is_canonical())
                    .map(|strings| fallback_reply(&processed, strings));
                (english, localized)
            }
        };

        if output.is_canonical() {
            reply.response = english;
            return reply;
        }

        match localized {
            Some(localized) => {
                reply.response = localized;
                reply.translation = Some(english);
            }
            None => {
                let translated = self
                    .translator
                    .translate_with_context(&self.llm, &english, output.code(), Some("en"))
                    .await;
                match translated {
                    Translation::Failed(reason) => {
                        warn!("Replying in English, translation failed: {}", reason);
                        reply.response = english;
                    }
                    translated => {
                        reply.response = translated.into_text();
                        reply.translation = Some(english);
                    }
                }
            }
        }
        reply
    }

    /// Plain text translation.
    pub async fn translate(&self, text: &str, target: &str, source: Option<&str>) -> TranslateReply {
        let source = self.translator.resolve_source(text, source);
        let translated = self.translator.translate(text, target, Some(&source)).await;
        TranslateReply {
            translated_text: translated.into_text(),
            source_language: source,
            target_language: target.to_string(),
        }
    }

    /// Extract and translate an uploaded file.
    pub async fn translate_file(
        &self,
        filename: &str,
        content: &[u8],
        target: &str,
        source: Option<&str>,
    ) -> ApiResult<FileTranslation> {
        let text = match extract_text(filename, content) {
            Extracted::Text(text) => text,
            Extracted::Unsupported(message) => return Err(ApiError::bad_request(message)),
        };
        if text.trim().is_empty() {
            return Err(ApiError::bad_request(EMPTY_FILE));
        }

        let sample: String = text.chars().take(DETECTION_SAMPLE_CHARS).collect();
        let detected = self.translator.detect_language(&sample);
        let source = match source.map(str::trim) {
            Some(code) if !code.is_empty() && !code.eq_ignore_ascii_case(AUTO) => code.to_lowercase(),
            _ => detected.to_string(),
        };

        info!(
            "Translating file {} ({} bytes) from {} to {}",
            filename,
            content.len(),
            source,
            target
        );
        let translated = self
            .translator
            .translate_long(&text, target, Some(&source))
            .await
            .into_text();

        Ok(FileTranslation {
            success: true,
            original_filename: filename.to_string(),
            file_size: content.len(),
            file_type: file_type(filename),
            detected_language: detected.to_string(),
            source_language: source,
            target_language: target.to_string(),
            original_content: preview(&text, FILE_PREVIEW_CHARS),
            char_count: text.chars().count(),
            translated_char_count: translated.chars().count(),
            translated_content: translated,
        })
    }

    /// Transcribe base64 audio. `language` of "auto" lets the model detect it.
    pub async fn speech_to_text(&self, audio: &str, language: &str) -> ApiResult<SpeechReply> {
        let model = self
            .speech
            .as_deref()
            .ok_or_else(|| ApiError::bad_request(SPEECH_UNAVAILABLE))?;
        if audio.trim().is_empty() {
            return Err(ApiError::bad_request("No audio data provided"));
        }

        match transcribe_base64(model, audio, Some(language)).await {
            Ok(transcript) => Ok(SpeechReply {
                transcription: transcript.text,
                detected_language: transcript.language.unwrap_or_else(|| language.to_string()),
                confidence: transcript.confidence,
            }),
            Err(SpeechError::InvalidAudio(e)) => {
                warn!("Rejecting audio payload: {}", e);
                Err(ApiError::bad_request("Invalid audio encoding"))
            }
            Err(SpeechError::Transcription(e)) => {
                warn!("Speech recognition error: {:#}", e);
                Err(ApiError::internal("Speech recognition failed"))
            }
        }
    }

    pub async fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            ollama_connected: self.llm.is_reachable().await,
            supported_languages: LanguageRegistry::get().codes(),
        }
    }
}

/// Explicit supported input language, else the detected one.
fn resolve_input_language(requested: &str, detected: &str) -> String {
    match Language::from_code(requested) {
        Ok(language) => language.code().to_string(),
        Err(_) => detected.to_string(),
    }
}

/// Supported output language, with "auto" and unknown codes treated as English.
fn supported_output(requested: &str) -> Language {
    Language::from_code(requested).unwrap_or_else(|_| Language::canonical())
}

/// Canned reply used when the LLM has nothing usable. Patterns are checked
/// in order: greeting, translation, help, SDG, question, anything else.
pub fn fallback_reply(message: &str, strings: &LanguageStrings) -> String {
    let lower = message.to_lowercase();

    if mentions_any(&lower, GREETING_KEYWORDS) {
        strings.greeting.to_string()
    } else if mentions_any(&lower, FALLBACK_TRANSLATION) {
        strings.translation_help.to_string()
    } else if mentions_any(&lower, FALLBACK_HELP) {
        strings.capabilities.to_string()
    } else if mentions_any(&lower, FALLBACK_SDG) {
        strings.sdg_equality.to_string()
    } else if message.contains('?') || mentions_any(&lower, FALLBACK_QUESTION) {
        LanguageStrings::render(strings.question, message)
    } else {
        LanguageStrings::render(strings.default_reply, message)
    }
}
