// Error types for news2tr
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Empty or unusable translation: {0}")]
    EmptyResult(String),

    #[error("Sanitization error: {0}")]
    Sanitization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert TranslateError to HTTP responses for Axum
impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        let status = match self {
            TranslateError::InvalidRequest(_) | TranslateError::Json(_) => StatusCode::BAD_REQUEST,
            TranslateError::Provider(_) | TranslateError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
