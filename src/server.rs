//! HTTP surface: router, request types and handlers.

use crate::assistant::Assistant;
use crate::config::Config;
use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::ollama::OllamaClient;
use crate::speech::{SpeechModel, WhisperHttpModel};
use crate::translation::{LibreTranslateEngine, Translator, WhatlangDetector};
use anyhow::{Context, Result};
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Shared, read-only state for all handlers
pub struct AppState {
    pub assistant: Assistant,
    pub max_upload_bytes: usize,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the external collaborators described by `config`. Probes Ollama
    /// for a model unless one is configured.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        let llm = OllamaClient::connect(
            client.clone(),
            &config.ollama_url,
            config.ollama_model.clone(),
        )
        .await;

        let engine = LibreTranslateEngine::new(
            client.clone(),
            &config.translation_url,
            config.translation_api_key.clone(),
            config.translation_timeout,
        );
        let translator = Translator::new(Arc::new(engine), Arc::new(WhatlangDetector));

        let speech: Option<Arc<dyn SpeechModel>> = match &config.whisper_url {
            Some(url) => {
                info!("Speech recognition enabled via {}", url);
                Some(Arc::new(WhisperHttpModel::new(
                    client,
                    url,
                    &config.whisper_model,
                    config.whisper_timeout,
                )))
            }
            None => {
                info!("WHISPER_URL not set, speech recognition disabled");
                None
            }
        };

        Ok(Self {
            assistant: Assistant::new(translator, llm, speech),
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}

pub fn router(state: SharedState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/translate", post(translate))
        .route("/api/translate-file", post(translate_file))
        .route("/api/speech-to-text", post(speech_to_text))
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Request / response types
// ============================================================================

fn auto() -> String {
    "auto".to_string()
}

fn english() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "auto")]
    pub input_language: String,
    #[serde(default = "english")]
    pub output_language: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "english")]
    pub target_language: String,
    #[serde(default)]
    pub source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub audio: String,
    #[serde(default = "english")]
    pub language: String,
}

/// Body returned when the chat pipeline itself fails
#[derive(Debug, Serialize)]
struct DegradedChat<'a> {
    error: &'static str,
    response: &'static str,
    detected_language: &'static str,
    input_language: &'a str,
    output_language: &'a str,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/chat
async fn chat(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match json_body(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };
    if request.message.trim().is_empty() {
        return ApiError::bad_request("Message is required").into_response();
    }

    let ChatRequest {
        message,
        input_language,
        output_language,
    } = request;

    // Run on its own task so a failure still yields the degraded chat body
    let task = {
        let state = state.clone();
        let input_language = input_language.clone();
        let output_language = output_language.clone();
        tokio::spawn(async move {
            state
                .assistant
                .chat(&message, &input_language, &output_language)
                .await
        })
    };

    match task.await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            error!("Chat pipeline failed: {}", e);
            let body = DegradedChat {
                error: "Internal server error",
                response: "I'm sorry, I'm having technical difficulties. Please try again.",
                detected_language: "en",
                input_language: &input_language,
                output_language: &output_language,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// POST /api/translate
async fn translate(
    State(state): State<SharedState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = json_body(payload)?;
    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }

    let reply = state
        .assistant
        .translate(
            &request.text,
            &request.target_language,
            request.source_language.as_deref(),
        )
        .await;
    Ok(Json(reply))
}

/// POST /api/translate-file (multipart: file, target_language, source_language)
async fn translate_file(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut target_language = english();
    let mut source_language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                file = Some((filename, bytes.to_vec()));
            }
            "target_language" => {
                target_language = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
            }
            "source_language" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                source_language = Some(value).filter(|v| !v.trim().is_empty());
            }
            _ => {}
        }
    }

    let (filename, content) = file.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    if filename.is_empty() {
        return Err(ApiError::bad_request("No file selected"));
    }

    let reply = state
        .assistant
        .translate_file(
            &filename,
            &content,
            &target_language,
            source_language.as_deref(),
        )
        .await?;
    Ok(Json(reply))
}

/// POST /api/speech-to-text
async fn speech_to_text(
    State(state): State<SharedState>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = json_body(payload)?;
    let reply = state
        .assistant
        .speech_to_text(&request.audio, &request.language)
        .await?;
    Ok(Json(reply))
}

/// GET /api/health
async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.assistant.health().await)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}
