// Provider fallback chain
// Author: kelexine (https://github.com/kelexine)

use crate::error::{Result, TranslateError};
use crate::metrics;
use crate::models::TargetLang;
use crate::providers::Provider;
use crate::utils::retry::{self, RetryPolicy};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Check a provider result before it is used.
///
/// Rejects blank output, output no longer than `min_length` characters, and
/// output that merely echoes the input (compared case-insensitively), which
/// is what web endpoints return when they didn't translate anything.
pub fn accept(input: &str, candidate: &str, min_length: usize) -> Result<String> {
    let candidate = candidate.trim();

    if candidate.is_empty() {
        return Err(TranslateError::EmptyResult("blank translation".to_string()));
    }
    if candidate.chars().count() <= min_length {
        return Err(TranslateError::EmptyResult(format!(
            "translation shorter than {} chars",
            min_length + 1
        )));
    }
    if candidate.to_lowercase() == input.trim().to_lowercase() {
        return Err(TranslateError::EmptyResult(
            "provider echoed the input".to_string(),
        ));
    }

    Ok(candidate.to_string())
}

/// Ordered providers tried one after another until a result is accepted.
pub struct ProviderChain {
    providers: Vec<Arc<dyn Provider>>,
    min_length: usize,
    retry: Option<RetryPolicy>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn Provider>>, min_length: usize) -> Self {
        Self {
            providers,
            min_length,
            retry: None,
        }
    }

    /// Wrap every provider call in [`retry::with_retry`].
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// First accepted translation and the provider that produced it, or
    /// `None` once every provider has failed or been rejected.
    pub async fn run(&self, text: &str, target: TargetLang) -> Option<(&'static str, String)> {
        for provider in &self.providers {
            let started = Instant::now();
            let result = self.call(provider.as_ref(), text, target).await;
            let elapsed = started.elapsed().as_secs_f64();

            match result.and_then(|candidate| accept(text, &candidate, self.min_length)) {
                Ok(translated) => {
                    metrics::record_provider_call(provider.name(), "accepted", elapsed);
                    debug!("{} accepted after {:.3}s", provider.name(), elapsed);
                    return Some((provider.name(), translated));
                }
                Err(e @ TranslateError::EmptyResult(_)) => {
                    metrics::record_provider_call(provider.name(), "rejected", elapsed);
                    warn!("{} result rejected: {}", provider.name(), e);
                }
                Err(e) => {
                    metrics::record_provider_call(provider.name(), "error", elapsed);
                    warn!("{} failed: {}", provider.name(), e);
                }
            }
        }

        None
    }

    async fn call(&self, provider: &dyn Provider, text: &str, target: TargetLang) -> Result<String> {
        match &self.retry {
            Some(policy) => {
                retry::with_retry(provider.name(), policy, move || provider.translate(text, target)).await
            }
            None => provider.translate(text, target).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_valid_translation() {
        assert_eq!(
            accept("Markets rally today", " Piyasalar bugün yükseldi ", 10).unwrap(),
            "Piyasalar bugün yükseldi"
        );
    }

    #[test]
    fn test_accept_rejects_blank_and_short() {
        assert!(matches!(accept("Hello world!", "   ", 10), Err(TranslateError::EmptyResult(_))));
        // exactly 10 chars is not "longer than 10"
        assert!(accept("Hello world!", "Merhaba dü", 10).is_err());
        assert!(accept("Hello world!", "Merhaba dün", 10).is_ok());
    }

    #[test]
    fn test_accept_rejects_case_insensitive_echo() {
        assert!(accept("Markets Rally Today", "markets rally today", 10).is_err());
        assert!(accept("Markets rally today", "MARKETS RALLY TODAY ", 10).is_err());
    }
}
