// HTTP request/response bodies
// Author: kelexine (https://github.com/kelexine)

use super::TargetLang;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateBody {
    pub text: Option<String>,
    #[serde(default)]
    pub target_lang: Option<TargetLang>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

/// Returned with a 500 when both providers failed on usable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateFailure {
    pub error: String,
    pub translation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchBody {
    pub texts: Vec<String>,
    #[serde(default)]
    pub target_lang: Option<TargetLang>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub translations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeBody {
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub target_lang: Option<TargetLang>,
}
