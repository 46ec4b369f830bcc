//! Request pipelines for the two diagram endpoints.
//!
//! Both handlers answer 200 even on logical failure; errors travel in the
//! body as an envelope, matching what the frontend expects.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::extract::extract_json_object;
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};
use crate::prompts;

/// Sampling temperature for diagram generation (deterministic-leaning).
const GENERATION_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for diagram analysis.
const ANALYSIS_TEMPERATURE: f32 = 0.4;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub nodes: Vec<Value>,
    pub links: Vec<Value>,
    #[serde(default)]
    pub question: Option<String>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn generate_diagram(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Json<Value> {
    info!(model = %state.client.model_name(), "generate-diagram request");

    match run_generation(state.client.as_ref(), &request).await {
        Ok(diagram) => Json(diagram),
        Err(err) => {
            warn!(error = %err, "diagram generation failed");
            Json(err.into_envelope().into_value())
        }
    }
}

pub async fn analyze_diagram(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Json<Value> {
    info!(
        nodes = request.nodes.len(),
        links = request.links.len(),
        has_question = request.question.is_some(),
        "analyze-diagram request"
    );

    match run_analysis(state.client.as_ref(), &request).await {
        Ok(analysis) => Json(analysis),
        Err(err) => {
            warn!(error = %err, "diagram analysis failed");
            Json(err.into_envelope().into_value())
        }
    }
}

/// Generator pipeline: templated prompt, one completion round trip, then
/// JSON extraction. The parsed object is passed through unvalidated; the
/// model owns the node/link shape.
pub async fn run_generation(
    client: &dyn CompletionClient,
    request: &GenerationRequest,
) -> Result<Value, ApiError> {
    let user_prompt = prompts::generation_prompt(&request.prompt);

    let completion = CompletionRequest {
        messages: vec![
            ChatMessage::system(prompts::GENERATOR_SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ],
        temperature: GENERATION_TEMPERATURE,
    };

    let output = client.complete(completion).await?;
    let message = output.trim();
    debug!(output = %message, "model raw output");

    let span = extract_json_object(message).ok_or_else(|| ApiError::Extraction {
        raw: message.to_string(),
    })?;

    serde_json::from_str(span).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Analyzer pipeline: serialize the diagram back to JSON text, ask the
/// model to review it, return the prose untouched.
pub async fn run_analysis(
    client: &dyn CompletionClient,
    request: &AnalysisRequest,
) -> Result<Value, ApiError> {
    let prompt =
        prompts::analysis_prompt(&request.nodes, &request.links, request.question.as_deref())?;

    let completion = CompletionRequest {
        messages: vec![ChatMessage::user(prompt)],
        temperature: ANALYSIS_TEMPERATURE,
    };

    let output = client.complete(completion).await?;
    Ok(json!({ "analysis": output.trim() }))
}
