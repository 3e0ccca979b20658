// news2tr - News snippet translator with provider fallback
// Author: kelexine (https://github.com/kelexine)

pub mod chunker;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod providers;
pub mod sanitize;
pub mod sentiment;
pub mod server;
pub mod translation;
pub mod utils;

pub use models::{Sentiment, TargetLang, TranslationRequest, TranslationResult};
pub use translation::Translator;
