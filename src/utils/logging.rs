//! Structured logging and secret redaction.
//!
//! This module configures the `tracing` ecosystem for the application and
//! keeps provider API keys out of logged request bodies.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

static JSON_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"("api_key"\s*:\s*")[^"]*(")"#).expect("json key pattern")
});
static QUERY_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([?&]api_key=)[^&\s]*").expect("query key pattern"));

/// Replaces LibreTranslate API keys with `[REDACTED]`.
///
/// Handles both the JSON body form (`"api_key":"..."`) and the query string
/// form (`?api_key=...`).
pub fn redact(input: &str) -> String {
    let redacted = JSON_KEY.replace_all(input, "${1}[REDACTED]${2}");
    QUERY_KEY.replace_all(&redacted, "${1}[REDACTED]").into_owned()
}
