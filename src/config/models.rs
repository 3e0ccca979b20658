//! Configuration data structures for news2tr.
//!
//! This module defines the schema for the application settings: the HTTP
//! server, the two upstream translation providers, text pipeline limits,
//! the optional retry policy and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::models::TargetLang;
use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream translation provider settings.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Text pipeline settings.
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Retry policy for provider calls.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body in bytes.
    /// Default: `1048576` (1 MiB)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Settings for the Google web-translate and LibreTranslate endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Google web-translate endpoint (Provider A).
    #[serde(default = "default_google_url")]
    pub google_url: String,

    #[serde(default = "default_true")]
    pub google_enabled: bool,

    /// LibreTranslate-compatible endpoint (Provider B).
    #[serde(default = "default_libre_url")]
    pub libre_url: String,

    #[serde(default = "default_true")]
    pub libre_enabled: bool,

    /// Optional API key sent as `api_key` in the LibreTranslate body.
    #[serde(default)]
    pub libre_api_key: Option<String>,

    /// Request timeout in seconds for every outbound call.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent to the Google endpoint.
    /// Default: `Mozilla/5.0`
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Settings for the sanitize/chunk/accept pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Texts longer than this (in characters) are split into chunks.
    /// Default: `500`
    #[serde(default = "default_chunk_limit")]
    pub chunk_limit: usize,

    /// A provider result must be longer than this to be accepted.
    /// Default: `10`
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Target language used when a request doesn't name one.
    /// Default: `tr`
    #[serde(default)]
    pub default_target: TargetLang,
}

/// Optional retry-with-backoff around each provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Disabled by default: a failing provider falls through immediately.
    #[serde(default)]
    pub enabled: bool,

    /// Default: `3`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First delay; doubles on every further attempt.
    /// Default: `1000`
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask API keys in logged request bodies.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub redact_secrets: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            google_url: default_google_url(),
            google_enabled: true,
            libre_url: default_libre_url(),
            libre_enabled: true,
            libre_api_key: None,
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            chunk_limit: default_chunk_limit(),
            min_length: default_min_length(),
            default_target: TargetLang::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            redact_secrets: true,
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_google_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_libre_url() -> String {
    "https://libretranslate.com/translate".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_chunk_limit() -> usize {
    500
}

fn default_min_length() -> usize {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
