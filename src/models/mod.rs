//! Core data types shared by the pipeline and the HTTP layer.
//!
//! Everything here is transient: built per call and dropped after the
//! response is written.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod api;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the service translates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLang {
    #[default]
    Tr,
    En,
}

impl TargetLang {
    /// Language code sent to providers.
    pub fn code(self) -> &'static str {
        match self {
            TargetLang::Tr => "tr",
            TargetLang::En => "en",
        }
    }

    /// Source language assumed for a request into `self`.
    pub fn source(self) -> TargetLang {
        match self {
            TargetLang::Tr => TargetLang::En,
            TargetLang::En => TargetLang::Tr,
        }
    }
}

impl fmt::Display for TargetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Keyword-based mood of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: TargetLang,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub summary: String,
    pub sentiment: Sentiment,
}

/// How a translation was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every chunk was accepted from a provider; names the last one used.
    Translated { provider: &'static str },
    /// Chunked input where some chunks were translated and some passed through.
    Partial,
    /// No provider produced an acceptable result.
    Passthrough,
    /// Sanitized text was empty, nothing was sent upstream.
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Translated { .. } => "translated",
            Outcome::Partial => "partial",
            Outcome::Passthrough => "passthrough",
            Outcome::Skipped => "skipped",
        }
    }
}

/// A best-effort translation and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub outcome: Outcome,
}

impl Translation {
    pub fn is_passthrough(&self) -> bool {
        self.outcome == Outcome::Passthrough
    }
}
