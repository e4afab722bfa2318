//! Client for a local Ollama server: generation, model selection and health.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Model used when probing fails or nothing preferred is installed
pub const DEFAULT_MODEL: &str = "phi";

/// Best to least capable for linguistic nuance
pub const PREFERRED_MODELS: &[&str] = &[
    "llama3.1:70b",
    "llama3.1:8b",
    "llama3:70b",
    "llama3:8b",
    "llama3.1",
    "llama3",
    "mistral:7b",
    "mistral",
    "phi3:14b",
    "phi3:7b",
    "phi:latest",
    "phi",
];

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Generated text must be longer than this to be shown to a user
const MIN_USABLE_CHARS: usize = 10;

const REFUSAL_PREFIXES: &[&str] = &["I cannot", "Sorry"];

/// Lowercase openers of a self-referential first sentence
const DISCLAIMER_PREFIXES: &[&str] = &["as an ai", "as a"];

const BOILERPLATE_PREFIXES: &[&str] = &[
    "As a Universal Language Support Assistant",
    "As an AI assistant",
    "I'm here to help",
    "Response:",
    "Answer:",
    "Here's my response:",
    "I understand that",
];

const BOILERPLATE_ENDINGS: &[&str] = &[
    "I hope this helps!",
    "Let me know if you need more help.",
    "Feel free to ask more questions.",
    "Is there anything else I can help you with?",
];

/// Responses longer than this are cut to their first sentences
const MAX_RESPONSE_CHARS: usize = 1000;
const MAX_RESPONSE_SENTENCES: usize = 3;

/// Sampling parameters sent as Ollama `options`, plus the client-side timeout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
    pub stop: Vec<String>,
    #[serde(skip)]
    pub timeout: Duration,
}

impl GenerationOptions {
    /// Balanced settings for conversational replies
    pub fn chat() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            num_predict: 400,
            top_k: Some(40),
            repeat_penalty: Some(1.1),
            stop: ["\n\nUser:", "\n\nHuman:", "###", "\n\n---"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Near-deterministic settings for translation assistance
    pub fn translation() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            num_predict: 500,
            top_k: None,
            repeat_penalty: None,
            stop: ["\n\nTranslate", "\n\nNote:", "Guidelines:", "IMPORTANT:"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Outcome of a generation call. Only `Generated` carries text fit for users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Generated(String),
    /// The model answered but the text was a refusal or too short
    Unusable(String),
    /// Transport failure, timeout, or non-success status
    Unavailable(String),
}

impl Generation {
    pub fn into_text(self) -> Option<String> {
        match self {
            Generation::Generated(text) => Some(text),
            Generation::Unusable(_) | Generation::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Ollama client bound to one model, chosen once at startup.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(client: reqwest::Client, base_url: &str, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Build a client, probing the server for the best installed model unless
    /// one is configured explicitly.
    pub async fn connect(
        client: reqwest::Client,
        base_url: &str,
        configured_model: Option<String>,
    ) -> Self {
        let model = match configured_model {
            Some(model) => {
                info!("Using configured Ollama model {}", model);
                model
            }
            None => select_model(&client, base_url, PREFERRED_MODELS).await,
        };
        Self::new(client, base_url, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a prompt. Never fails: problems are reported through
    /// the returned `Generation`.
    pub async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Generation {
        match self.request(prompt, options).await {
            Ok(raw) => {
                let outcome = postprocess(&raw);
                if let Generation::Unusable(reason) = &outcome {
                    debug!("Discarding Ollama output: {}", reason);
                }
                outcome
            }
            Err(e) => {
                warn!("Ollama generation failed: {:#}", e);
                Generation::Unavailable(format!("{:#}", e))
            }
        }
    }

    async fn request(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(options.timeout)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            anyhow::bail!("Ollama API error ({}): {}", status, body);
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(generated.response)
    }

    /// True if `/api/version` answers with a success status within 5 seconds
    pub async fn is_reachable(&self) -> bool {
        match self
            .client
            .get(format!("{}/api/version", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Ollama health check failed: {}", e);
                false
            }
        }
    }
}

/// Pick the first preferred model installed on the server, or `DEFAULT_MODEL`.
pub async fn select_model(client: &reqwest::Client, base_url: &str, preferences: &[&str]) -> String {
    match list_models(client, base_url).await {
        Ok(installed) => {
            if let Some(model) = preferences
                .iter()
                .find(|preferred| installed.iter().any(|name| name == *preferred))
            {
                info!("✓ Using {} model for enhanced linguistic understanding", model);
                return model.to_string();
            }
            warn!(
                "None of the preferred models are installed ({} found), using {}",
                installed.len(),
                DEFAULT_MODEL
            );
        }
        Err(e) => {
            warn!("Could not list Ollama models, using {}: {:#}", DEFAULT_MODEL, e);
        }
    }
    DEFAULT_MODEL.to_string()
}

async fn list_models(client: &reqwest::Client, base_url: &str) -> Result<Vec<String>> {
    let response = client
        .get(format!("{}/api/tags", base_url.trim_end_matches('/')))
        .timeout(PROBE_TIMEOUT)
        .send()
        .await
        .context("Failed to reach Ollama tags endpoint")?;

    if !response.status().is_success() {
        anyhow::bail!("Ollama tags endpoint returned {}", response.status());
    }

    let tags: TagsResponse = response
        .json()
        .await
        .context("Failed to parse Ollama tags response")?;

    Ok(tags.models.into_iter().map(|m| m.name).collect())
}

/// Validate and clean raw model output.
///
/// Refusals are rejected, a leading "As an AI..." sentence is dropped, and
/// anything not longer than `MIN_USABLE_CHARS` is rejected.
pub fn postprocess(raw: &str) -> Generation {
    let mut text = raw.trim();

    if text.is_empty() {
        return Generation::Unusable("empty response".to_string());
    }

    if REFUSAL_PREFIXES.iter().any(|p| text.starts_with(p)) {
        return Generation::Unusable(format!("refusal: {}", truncate(text, 60)));
    }

    for prefix in DISCLAIMER_PREFIXES {
        if text.to_lowercase().starts_with(prefix) {
            if let Some(period) = text.find('.') {
                text = text[period + 1..].trim();
            }
        }
    }

    if text.chars().count() <= MIN_USABLE_CHARS {
        return Generation::Unusable(format!("too short: '{}'", text));
    }

    Generation::Generated(text.to_string())
}

/// Strip conversational boilerplate and cap overly long chat replies.
///
/// Returns `None` when too little text remains.
pub fn tidy_response(text: &str) -> Option<String> {
    let mut response = text.trim().to_string();

    for prefix in BOILERPLATE_PREFIXES {
        if starts_with_ignore_case(&response, prefix) {
            response = response[prefix.len()..].trim().to_string();
            if response.starts_with(',') || response.starts_with(':') {
                response = response[1..].trim().to_string();
            }
        }
    }

    for ending in BOILERPLATE_ENDINGS {
        if ends_with_ignore_case(&response, ending) {
            response = response[..response.len() - ending.len()].trim().to_string();
            if response.ends_with(',') {
                response.pop();
                response.push('.');
            } else if !response.is_empty() && !response.ends_with(['.', '!', '?']) {
                response.push('.');
            }
        }
    }

    if response.chars().count() > MAX_RESPONSE_CHARS {
        let sentences: Vec<&str> = response.split(". ").collect();
        if sentences.len() > MAX_RESPONSE_SENTENCES {
            let mut capped = sentences[..MAX_RESPONSE_SENTENCES].join(". ");
            if !capped.ends_with('.') {
                capped.push('.');
            }
            response = capped;
        }
    }

    if response.trim().chars().count() < MIN_USABLE_CHARS {
        return None;
    }
    Some(response)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    text.len() >= suffix.len()
        && text
            .get(text.len() - suffix.len()..)
            .map(|tail| tail.eq_ignore_ascii_case(suffix))
            .unwrap_or(false)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
