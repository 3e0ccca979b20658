//! Upstream translation providers.
//!
//! Each provider turns a piece of clean text into a translation by way of a
//! [`Transport`], so the HTTP stack stays swappable.
//!
//! # Submodules
//!
//! - `google`: Google web-translate endpoint (`translate_a/single`).
//! - `libre`: LibreTranslate-compatible `/translate` endpoint.
//! - `transport`: Outbound request types and the reqwest-backed transport.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod google;
pub mod libre;
pub mod transport;

pub use google::GoogleProvider;
pub use libre::LibreProvider;
pub use transport::{HttpTransport, OutboundRequest, OutboundResponse, Transport};

use crate::config::ProvidersConfig;
use crate::error::Result;
use crate::models::TargetLang;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Short identifier used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Translate `text` into `target`. May return the input unchanged; callers
    /// decide whether a result is acceptable.
    async fn translate(&self, text: &str, target: TargetLang) -> Result<String>;
}

/// Build the enabled providers in fallback order (Google first).
pub fn from_config(config: &ProvidersConfig, transport: Arc<dyn Transport>) -> Vec<Arc<dyn Provider>> {
    let mut providers: Vec<Arc<dyn Provider>> = Vec::new();

    if config.google_enabled {
        providers.push(Arc::new(GoogleProvider::new(
            transport.clone(),
            config.google_url.as_str(),
            config.user_agent.as_str(),
        )));
    }
    if config.libre_enabled {
        providers.push(Arc::new(LibreProvider::new(
            transport,
            config.libre_url.as_str(),
            config.libre_api_key.clone(),
        )));
    }

    providers
}
