// Outbound request indirection for translation providers
// Author: kelexine (https://github.com/kelexine)

use crate::config::ProvidersConfig;
use crate::error::{Result, TranslateError};
use crate::utils::logging;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// A provider call described independently of the HTTP stack.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl OutboundRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundResponse {
    pub status: u16,
    pub body: String,
}

impl OutboundResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| TranslateError::Provider(format!("Response parsing error: {}", e)))
    }

    /// Non-2xx responses become a provider error carrying the upstream message.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let message = extract_error_message(&self.body)
            .unwrap_or_else(|| self.body.chars().take(200).collect());
        Err(TranslateError::Provider(format!(
            "HTTP {}: {}",
            self.status, message
        )))
    }
}

/// Extract an error message from common JSON error shapes
/// (`{"error": "..."}` or `{"error": {"message": "..."}}`).
fn extract_error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    let error = parsed.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

/// Sends provider requests. The caller owns transport, headers and origin;
/// tests substitute an in-memory implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse>;
}

/// [`Transport`] backed by a pooled reqwest client.
pub struct HttpTransport {
    http_client: Client,
    redact_secrets: bool,
}

impl HttpTransport {
    pub fn new(config: &ProvidersConfig, redact_secrets: bool) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| TranslateError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for translation providers");

        Ok(Self {
            http_client,
            redact_secrets,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse> {
        if let Some(body) = &request.body {
            let raw = body.to_string();
            let shown = if self.redact_secrets {
                logging::redact(&raw)
            } else {
                raw
            };
            trace!("{} {} body={}", request.method, request.url, shown);
        } else {
            trace!("{} {}", request.method, request.url);
        }

        let mut builder = self.http_client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TranslateError::Provider(format!("HTTP error: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TranslateError::Provider(format!("Failed to read response body: {}", e)))?;

        Ok(OutboundResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let get = OutboundRequest::get("http://x/y").header("User-Agent", "Mozilla/5.0");
        assert_eq!(get.method, Method::GET);
        assert_eq!(get.headers, vec![("User-Agent".to_string(), "Mozilla/5.0".to_string())]);
        assert!(get.body.is_none());

        let post = OutboundRequest::post_json("http://x/y", json!({"q": "hi"}));
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.body, Some(json!({"q": "hi"})));
    }

    #[test]
    fn test_error_for_status_extracts_message() {
        let resp = OutboundResponse {
            status: 429,
            body: r#"{"error":"Too many requests"}"#.to_string(),
        };
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "Provider error: HTTP 429: Too many requests");

        let nested = OutboundResponse {
            status: 500,
            body: r#"{"error":{"message":"backend down"}}"#.to_string(),
        };
        assert!(nested.error_for_status().unwrap_err().to_string().contains("backend down"));
    }

    #[test]
    fn test_success_passes_through() {
        let resp = OutboundResponse {
            status: 200,
            body: "[]".to_string(),
        };
        assert!(resp.error_for_status().is_ok());
    }
}
