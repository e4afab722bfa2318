//! Speech recognition through an OpenAI-compatible Whisper server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Result of transcribing an audio clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    /// Language reported by the model, if any
    pub language: Option<String>,
    /// Mean segment log-probability, 0 when the model reports none
    pub confidence: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Invalid audio encoding: {0}")]
    InvalidAudio(#[from] base64::DecodeError),
    #[error("Speech recognition failed: {0:#}")]
    Transcription(anyhow::Error),
}

/// Transcribes an audio file on disk.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// `language` is a hint; `None` lets the model detect it.
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Transcript>;
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    avg_logprob: f64,
}

/// Client for `POST /v1/audio/transcriptions` with `verbose_json` output.
#[derive(Debug, Clone)]
pub struct WhisperHttpModel {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl WhisperHttpModel {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl SpeechModel for WhisperHttpModel {
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Transcript> {
        let audio = tokio::fs::read(audio_path)
            .await
            .with_context(|| format!("Failed to read audio file {}", audio_path.display()))?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name)
            .mime_str("audio/wav")
            .context("Invalid audio MIME type")?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");
        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .context("Failed to send audio to speech server")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Speech server error ({}): {}", status, body);
        }

        let parsed: VerboseTranscription = response
            .json()
            .await
            .context("Failed to parse transcription response")?;

        let confidence = if parsed.segments.is_empty() {
            0.0
        } else {
            parsed.segments.iter().map(|s| s.avg_logprob).sum::<f64>()
                / parsed.segments.len() as f64
        };

        Ok(Transcript {
            text: parsed.text.trim().to_string(),
            language: parsed.language,
            confidence,
        })
    }
}

/// Decode base64 audio into a temporary `.wav` file, transcribe it, and
/// remove the file whatever the outcome.
///
/// `language` of `None` or `"auto"` lets the model detect the language.
pub async fn transcribe_base64(
    model: &dyn SpeechModel,
    audio_base64: &str,
    language: Option<&str>,
) -> Result<Transcript, SpeechError> {
    let audio = base64::engine::general_purpose::STANDARD.decode(strip_data_url(audio_base64))?;

    // Dropping the guard deletes the file on every path out of this function
    let mut file = tempfile::Builder::new()
        .prefix("speech-")
        .suffix(".wav")
        .tempfile()
        .context("Failed to create temporary audio file")
        .map_err(SpeechError::Transcription)?;
    file.write_all(&audio)
        .and_then(|_| file.flush())
        .context("Failed to write temporary audio file")
        .map_err(SpeechError::Transcription)?;

    let hint = language.filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("auto"));
    debug!(
        "Transcribing {} bytes of audio (language hint: {:?})",
        audio.len(),
        hint
    );

    model
        .transcribe(file.path(), hint)
        .await
        .map_err(SpeechError::Transcription)
}

/// Browsers send `data:audio/wav;base64,...`; keep only the payload.
fn strip_data_url(input: &str) -> &str {
    let trimmed = input.trim();
    match trimmed.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => trimmed,
    }
}
