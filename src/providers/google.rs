// Google web-translate provider
// Author: kelexine (https://github.com/kelexine)

use super::transport::{OutboundRequest, Transport};
use super::Provider;
use crate::error::{Result, TranslateError};
use crate::models::TargetLang;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct GoogleProvider {
    transport: Arc<dyn Transport>,
    base_url: String,
    user_agent: String,
}

impl GoogleProvider {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    fn request_url(&self, text: &str, target: TargetLang) -> String {
        format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.base_url,
            target.source().code(),
            target.code(),
            urlencoding::encode(text)
        )
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(&self, text: &str, target: TargetLang) -> Result<String> {
        let request = OutboundRequest::get(self.request_url(text, target))
            .header("User-Agent", self.user_agent.as_str());

        let response = self.transport.send(request).await?.error_for_status()?;
        let translated = parse_response(&response.body)?;

        debug!("Google returned {} chars", translated.chars().count());
        Ok(translated)
    }
}

/// Join the translated fragments of a `translate_a/single` response.
///
/// The payload is a nested array; element 0 holds `[translated, original, ...]`
/// tuples, one per sentence the service detected.
pub(crate) fn parse_response(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TranslateError::Provider(format!("Response parsing error: {}", e)))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Provider("Response has no segment array".to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}
