//! HTTP routes for the AI generation endpoints.
//!
//! Each route builds a templated prompt, forwards it to the selected
//! provider, and returns parsed (or fallback-patched) JSON. Provider errors
//! surface as explicit messages; nothing is retried and no editor state is
//! touched on failure.

use crate::prompts;
use crate::provider::{PromptRequest, ProviderKind, TextGenerator};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use slidecraft_core::generate::{GeneratedSlides, QuizBatch};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared application state.
pub struct AppState {
    /// The configured text-generation backend.
    pub generator: Arc<dyn TextGenerator>,
}

/// Build the router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/generate-slides", post(generate_slides))
        .route("/api/generate-quiz", post(generate_quiz))
        .route("/api/enhance-content", post(enhance_content))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> &'static str {
    "slidecraft server - POST /api/generate-slides, /api/generate-quiz, /api/enhance-content"
}

async fn health() -> &'static str {
    "ok"
}

/// Provider fields shared by every request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderSelection {
    provider: String,
    model: String,
    #[serde(default)]
    api_key: Option<String>,
}

type ErrorResponse = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (status, Json(json!({ "error": message.into() })))
}

/// Validate the provider selection: known provider, non-empty API key.
fn resolve(selection: &ProviderSelection) -> Result<(ProviderKind, String), ErrorResponse> {
    let Some(kind) = ProviderKind::from_name(&selection.provider) else {
        warn!("rejected request for unknown provider {:?}", selection.provider);
        return Err(error(StatusCode::BAD_REQUEST, "Unsupported AI provider"));
    };
    let Some(key) = selection.api_key.as_deref().filter(|key| !key.is_empty()) else {
        return Err(error(StatusCode::BAD_REQUEST, "API key is required"));
    };
    Ok((kind, key.to_string()))
}

fn provider_failure(selection: &ProviderSelection, err: impl std::fmt::Display) -> ErrorResponse {
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to use {} {}: {}", selection.provider, selection.model, err),
    )
}

fn default_slide_count() -> u32 {
    5
}

fn default_audience() -> String {
    "general".to_string()
}

fn default_style() -> String {
    "professional".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateSlidesRequest {
    topic: String,
    #[serde(default = "default_slide_count")]
    slide_count: u32,
    #[serde(default = "default_audience")]
    audience: String,
    #[serde(default = "default_style")]
    style: String,
    #[serde(default)]
    custom_prompt: Option<String>,
    #[serde(flatten)]
    selection: ProviderSelection,
}

async fn generate_slides(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateSlidesRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    let (provider, api_key) = resolve(&request.selection)?;
    info!(
        provider = %request.selection.provider,
        model = %request.selection.model,
        topic = %request.topic,
        count = request.slide_count,
        "slide generation request"
    );

    let prompt = prompts::slide_generation(
        &request.topic,
        request.slide_count,
        &request.audience,
        &request.style,
        request.custom_prompt.as_deref(),
    );
    let text = state
        .generator
        .generate(PromptRequest {
            provider,
            model: request.selection.model.clone(),
            api_key,
            prompt,
            temperature: 0.7,
        })
        .await
        .map_err(|e| provider_failure(&request.selection, e))?;

    let generated = GeneratedSlides::from_text(&request.topic, &text);
    if generated.is_fallback() {
        warn!("slide generation response fell back to raw text");
    }
    Ok(Json(json!({ "slides": generated.into_slides() })))
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_question_count() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateQuizRequest {
    content: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default = "default_question_count")]
    question_count: u32,
    #[serde(flatten)]
    selection: ProviderSelection,
}

async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateQuizRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    let (provider, api_key) = resolve(&request.selection)?;
    info!(
        provider = %request.selection.provider,
        model = %request.selection.model,
        difficulty = %request.difficulty,
        "quiz generation request"
    );

    let prompt =
        prompts::quiz_generation(&request.content, &request.difficulty, request.question_count);
    let text = state
        .generator
        .generate(PromptRequest {
            provider,
            model: request.selection.model.clone(),
            api_key,
            prompt,
            temperature: 0.8,
        })
        .await
        .map_err(|e| provider_failure(&request.selection, e))?;

    let batch = QuizBatch::from_text(&text);
    Ok(Json(json!({ "quiz": batch.first() })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnhanceContentRequest {
    content: String,
    /// Named rewrite style (improve, expand, simplify, ...).
    #[serde(rename = "type", default)]
    enhancement_type: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default = "default_element_type")]
    element_type: String,
    #[serde(flatten)]
    selection: ProviderSelection,
}

fn default_element_type() -> String {
    "text".to_string()
}

async fn enhance_content(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EnhanceContentRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    let (provider, api_key) = resolve(&request.selection)?;
    info!(
        provider = %request.selection.provider,
        model = %request.selection.model,
        element = %request.element_type,
        "content enhancement request"
    );

    let prompt = prompts::enhancement(
        &request.content,
        request.enhancement_type.as_deref(),
        request.instructions.as_deref(),
        &request.element_type,
    );
    let text = state
        .generator
        .generate(PromptRequest {
            provider,
            model: request.selection.model.clone(),
            api_key,
            prompt,
            temperature: 0.7,
        })
        .await
        .map_err(|e| provider_failure(&request.selection, e))?;

    Ok(Json(json!({ "enhancedContent": text.trim() })))
}
