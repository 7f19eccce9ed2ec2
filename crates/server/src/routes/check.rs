use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Brand check request
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Prompt the response answers, or should be generated for
    #[serde(default)]
    pub prompt: Option<String>,

    /// Brand to look for
    #[serde(default)]
    pub brand: Option<String>,

    /// Raw provider payload; the configured provider is asked when absent
    #[serde(default)]
    pub response: Option<Value>,
}

/// Where the checked payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Inline,
    Provider,
    Fallback,
}

/// Brand check response
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub prompt: String,
    pub brand: String,
    pub mentioned: bool,
    pub positions: Vec<usize>,
    pub position: Option<usize>,
    pub raw_text: String,
    pub source: ResponseSource,
}

/// Check one response for a brand mention
pub async fn check_brand(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let prompt = required_field(request.prompt.as_deref(), "prompt")?;
    let brand = required_field(request.brand.as_deref(), "brand")?;

    let (raw, source) = match request.response {
        Some(raw) => (raw, ResponseSource::Inline),
        None => fetch_response(&state, prompt).await,
    };

    let report = brandscan::check_brand(&raw, brand);
    tracing::debug!(
        brand,
        source = ?source,
        shape = report.shape.as_str(),
        items = report.items.len(),
        mentioned = report.result.mentioned,
        "brand check complete"
    );

    Ok(Json(CheckResponse {
        prompt: prompt.to_string(),
        brand: brand.to_string(),
        mentioned: report.result.mentioned,
        positions: report.result.positions,
        position: report.result.position,
        raw_text: report.raw_text,
        source,
    }))
}

fn required_field<'a>(value: Option<&'a str>, name: &str) -> ServerResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServerError::BadRequest(format!(
            "`{name}` is required and must not be blank"
        ))),
    }
}

/// Ask the provider for a payload, degrading to the fallback text.
async fn fetch_response(state: &ServerState, prompt: &str) -> (Value, ResponseSource) {
    let fallback = || Value::String(state.config.fallback_text.clone());

    let Some(provider) = state.provider.as_ref() else {
        tracing::warn!("no model provider configured, checking fallback text");
        return (fallback(), ResponseSource::Fallback);
    };

    match provider.generate(prompt).await {
        Ok(raw) => (raw, ResponseSource::Provider),
        Err(err) => {
            tracing::warn!(
                provider = provider.name(),
                error = %err,
                "model provider failed, checking fallback text"
            );
            (fallback(), ResponseSource::Fallback)
        }
    }
}
