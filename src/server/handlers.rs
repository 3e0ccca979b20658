// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{Result, TranslateError};
use crate::metrics;
use crate::models::api::{
    BatchBody, BatchResponse, SummarizeBody, TranslateBody, TranslateFailure, TranslateResponse,
};
use crate::models::TargetLang;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let providers = state.translator.provider_names();

    // Without providers every request is a passthrough
    let overall_status = if providers.is_empty() {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    let provider_check = if providers.is_empty() {
        HealthCheck {
            status: "warning".to_string(),
            message: "No providers enabled, translations pass through".to_string(),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Fallback order: {}", providers.join(" -> ")),
        }
    };
    checks.insert("providers".to_string(), provider_check);

    let pipeline_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "Chunk limit {} chars, default target {}",
            state.config.translation.chunk_limit, state.config.translation.default_target
        ),
    };
    checks.insert("pipeline".to_string(), pipeline_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> Result<Response> {
    let body = metrics::gather_metrics()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

/// Deserialize a raw body so malformed JSON maps to a 400 with our error shape.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        debug!("Rejecting request body: {}", e);
        TranslateError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })
}

fn required_text(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TranslateError::InvalidRequest(format!(
            "`{}` must be a non-empty string",
            field
        ))),
    }
}

fn target_or_default(state: &AppState, target: Option<TargetLang>) -> TargetLang {
    target.unwrap_or(state.config.translation.default_target)
}

/// Handler for POST /translate
pub async fn translate_handler(State(state): State<AppState>, body: String) -> Response {
    let result = translate_inner(&state, &body).await;
    let response = match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("/translate", response.status().as_u16());
    response
}

async fn translate_inner(state: &AppState, body: &str) -> Result<Response> {
    let req: TranslateBody = parse_body(body)?;
    let text = required_text("text", req.text)?;
    let target = target_or_default(state, req.target_lang);

    info!("Translate request: {} chars -> {}", text.chars().count(), target);

    let translation = state.translator.translate_detailed(&text, target).await;
    if translation.is_passthrough() {
        error!("Translation failed on every provider");
        let failure = TranslateFailure {
            error: "All translation providers failed".to_string(),
            translation: translation.text,
        };
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response());
    }

    debug!("Translation outcome: {}", translation.outcome.as_str());
    Ok(Json(TranslateResponse {
        translation: translation.text,
    })
    .into_response())
}

/// Handler for POST /translate/batch
pub async fn batch_handler(State(state): State<AppState>, body: String) -> Response {
    let result = batch_inner(&state, &body).await;
    let response = match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("/translate/batch", response.status().as_u16());
    response
}

async fn batch_inner(state: &AppState, body: &str) -> Result<Response> {
    let req: BatchBody = parse_body(body)?;
    if req.texts.is_empty() {
        return Err(TranslateError::InvalidRequest(
            "`texts` must contain at least one entry".to_string(),
        ));
    }
    let target = target_or_default(state, req.target_lang);

    info!("Batch request: {} texts -> {}", req.texts.len(), target);

    let translations = state.translator.translate_batch(&req.texts, target).await;
    Ok(Json(BatchResponse { translations }).into_response())
}

/// Handler for POST /summarize
pub async fn summarize_handler(State(state): State<AppState>, body: String) -> Response {
    let result = summarize_inner(&state, &body).await;
    let response = match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request("/summarize", response.status().as_u16());
    response
}

async fn summarize_inner(state: &AppState, body: &str) -> Result<Response> {
    let req: SummarizeBody = parse_body(body)?;
    let title = required_text("title", req.title)?;
    let target = target_or_default(state, req.target_lang);

    let result = state
        .translator
        .summarize_and_translate(&title, req.body.as_deref(), target)
        .await;

    info!("Summarized item as {}", result.sentiment.as_str());
    Ok(Json(result).into_response())
}
