// LibreTranslate-compatible provider
// Author: kelexine (https://github.com/kelexine)

use super::transport::{OutboundRequest, Transport};
use super::Provider;
use crate::error::Result;
use crate::models::TargetLang;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    translated_text: String,
}

pub struct LibreProvider {
    transport: Arc<dyn Transport>,
    url: String,
    api_key: Option<String>,
}

impl LibreProvider {
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            transport,
            url: url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl Provider for LibreProvider {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    async fn translate(&self, text: &str, target: TargetLang) -> Result<String> {
        let payload = LibreRequest {
            q: text,
            source: target.source().code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let request = OutboundRequest::post_json(self.url.as_str(), serde_json::to_value(&payload)?);

        let response = self.transport.send(request).await?.error_for_status()?;
        let parsed: LibreResponse = response.json()?;

        debug!("LibreTranslate returned {} chars", parsed.translated_text.chars().count());
        Ok(parsed.translated_text)
    }
}
