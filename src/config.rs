use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,

    // Ollama
    pub ollama_url: String,
    /// Skips model probing at startup when set
    pub ollama_model: Option<String>,

    // Translation engine (LibreTranslate-compatible)
    pub translation_url: String,
    pub translation_api_key: Option<String>,
    pub translation_timeout: Duration,

    // Speech recognition (OpenAI-compatible Whisper server)
    pub whisper_url: Option<String>,
    pub whisper_model: String,
    pub whisper_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 5000)?,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,

            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: non_empty_var("OLLAMA_MODEL"),

            translation_url: std::env::var("TRANSLATION_URL")
                .unwrap_or_else(|_| "http://localhost:5001".to_string()),
            translation_api_key: non_empty_var("TRANSLATION_API_KEY"),
            translation_timeout: Duration::from_secs(parse_var("TRANSLATION_TIMEOUT_SECS", 15)?),

            whisper_url: non_empty_var("WHISPER_URL"),
            whisper_model: std::env::var("WHISPER_MODEL")
                .unwrap_or_else(|_| "whisper-1".to_string()),
            whisper_timeout: Duration::from_secs(parse_var("WHISPER_TIMEOUT_SECS", 60)?),
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 10 * 1024 * 1024,
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: None,
            translation_url: "http://localhost:5001".to_string(),
            translation_api_key: None,
            translation_timeout: Duration::from_secs(15),
            whisper_url: None,
            whisper_model: "whisper-1".to_string(),
            whisper_timeout: Duration::from_secs(60),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional numeric variable, failing loudly on malformed values
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", name, raw)),
        _ => Ok(default),
    }
}
