//! Translation pipeline: sanitize, chunk, run the provider chain.
//!
//! [`Translator`] is the entry point used by the HTTP layer and by library
//! callers. None of its public operations fail: when every provider is down
//! the caller gets the cleaned original back.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod chain;

pub use chain::{accept, ProviderChain};

use crate::chunker;
use crate::config::AppConfig;
use crate::error::Result;
use crate::metrics;
use crate::models::{Outcome, TargetLang, Translation, TranslationResult};
use crate::providers::{self, HttpTransport, Transport};
use crate::sanitize;
use crate::sentiment;
use crate::utils::retry::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, warn};

/// Characters of body text appended to a title when summarizing.
pub const SUMMARY_LEAD_CHARS: usize = 300;

#[derive(Clone)]
pub struct Translator {
    chain: Arc<ProviderChain>,
    chunk_limit: usize,
}

impl Translator {
    pub fn new(chain: ProviderChain, chunk_limit: usize) -> Self {
        Self {
            chain: Arc::new(chain),
            chunk_limit: chunk_limit.max(1),
        }
    }

    /// Build the configured provider chain over a reqwest transport.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(
            &config.providers,
            config.logging.redact_secrets,
        )?);
        Ok(Self::with_transport(config, transport))
    }

    /// Build the configured provider chain over a caller-supplied transport.
    pub fn with_transport(config: &AppConfig, transport: Arc<dyn Transport>) -> Self {
        let providers = providers::from_config(&config.providers, transport);
        let mut chain = ProviderChain::new(providers, config.translation.min_length);
        if config.retry.enabled {
            chain = chain.with_retry(RetryPolicy::from(&config.retry));
        }
        Self::new(chain, config.translation.chunk_limit)
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.chain.provider_names()
    }

    /// Best-effort translation of `text`; the cleaned original on failure.
    pub async fn translate(&self, text: &str, target: TargetLang) -> String {
        self.translate_detailed(text, target).await.text
    }

    pub async fn translate_to_turkish(&self, text: &str) -> String {
        self.translate(text, TargetLang::Tr).await
    }

    /// Translate `text` and report how the result was obtained.
    pub async fn translate_detailed(&self, text: &str, target: TargetLang) -> Translation {
        let cleaned = sanitize::clean(text);
        if cleaned.is_empty() {
            debug!("Nothing left to translate after sanitizing");
            return self.finish(String::new(), Outcome::Skipped);
        }

        let chunks = chunker::split(&cleaned, self.chunk_limit);
        if chunks.len() > 1 {
            debug!("Translating {} chars in {} chunks", cleaned.chars().count(), chunks.len());
        }

        // One chunk at a time, in order
        let mut parts = Vec::with_capacity(chunks.len());
        let mut accepted = 0;
        let mut last_provider = None;
        for chunk in &chunks {
            match self.chain.run(chunk, target).await {
                Some((provider, translated)) => {
                    accepted += 1;
                    last_provider = Some(provider);
                    parts.push(translated);
                }
                None => parts.push(chunk.clone()),
            }
        }

        match last_provider {
            None => {
                warn!("All providers failed, returning sanitized input");
                self.finish(cleaned, Outcome::Passthrough)
            }
            Some(provider) if accepted == chunks.len() => {
                self.finish(parts.join(" "), Outcome::Translated { provider })
            }
            Some(_) => self.finish(parts.join(" "), Outcome::Partial),
        }
    }

    fn finish(&self, text: String, outcome: Outcome) -> Translation {
        metrics::record_translation(outcome.as_str());
        Translation { text, outcome }
    }

    /// Translate every text concurrently, keeping input order.
    ///
    /// Individual failures already degrade to the cleaned original; if the
    /// batch itself breaks (a task panics) the input is returned unchanged.
    pub async fn translate_batch(&self, texts: &[String], target: TargetLang) -> Vec<String> {
        let handles: Vec<_> = texts
            .iter()
            .cloned()
            .map(|text| {
                let translator = self.clone();
                tokio::spawn(async move { translator.translate(&text, target).await })
            })
            .collect();

        match futures::future::try_join_all(handles).await {
            Ok(translations) => translations,
            Err(e) => {
                warn!("Batch translation failed: {}, returning originals", e);
                texts.to_vec()
            }
        }
    }

    /// Translate a news item's title plus the lead of its body and tag its
    /// sentiment.
    ///
    /// Short headlines are kept: when the combined text is too short to be
    /// worth a provider call, the cleaned source is returned untranslated.
    pub async fn summarize_and_translate(
        &self,
        title: &str,
        body: Option<&str>,
        target: TargetLang,
    ) -> TranslationResult {
        let title = sanitize::normalize(title);
        let body = body.map(sanitize::normalize).unwrap_or_default();
        // Classify visible text only, never attributes or script bodies
        let sentiment = sentiment::classify_item(&title, Some(body.as_str()));

        let lead = chunker::split(&body, SUMMARY_LEAD_CHARS)
            .into_iter()
            .next()
            .unwrap_or_default();

        let source = match (title.is_empty(), lead.is_empty()) {
            (false, false) if ends_sentence(&title) => format!("{} {}", title, lead),
            (false, false) => format!("{}. {}", title, lead),
            (false, true) => title,
            (true, _) => lead,
        };

        let translation = self.translate_detailed(&source, target).await;
        let summary = match translation.outcome {
            Outcome::Skipped => source,
            _ => translation.text,
        };

        TranslationResult { summary, sentiment }
    }
}

fn ends_sentence(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}
