// Shared test helpers: an in-memory transport and canned provider replies
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use news2tr::config::AppConfig;
use news2tr::error::{Result, TranslateError};
use news2tr::providers::{OutboundRequest, OutboundResponse, Transport};
use news2tr::Translator;
use reqwest::Method;
use serde_json::json;
use std::sync::{Arc, Mutex};

type Handler = Box<dyn Fn(&OutboundRequest) -> Result<OutboundResponse> + Send + Sync>;

/// Transport that answers from a closure and records every request.
pub struct FakeTransport {
    handler: Handler,
    calls: Mutex<Vec<OutboundRequest>>,
}

impl FakeTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&OutboundRequest) -> Result<OutboundResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<OutboundRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn google_calls(&self) -> usize {
        self.calls().iter().filter(|r| is_google(r)).count()
    }

    pub fn libre_calls(&self) -> usize {
        self.calls().iter().filter(|r| !is_google(r)).count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse> {
        self.calls.lock().unwrap().push(request.clone());
        (self.handler)(&request)
    }
}

/// Google requests are GETs, LibreTranslate requests are POSTs.
pub fn is_google(request: &OutboundRequest) -> bool {
    request.method == Method::GET
}

/// The text a request asks to translate, for either provider.
pub fn request_text(request: &OutboundRequest) -> String {
    if is_google(request) {
        let encoded = request
            .url
            .split("&q=")
            .nth(1)
            .unwrap_or_default();
        urlencoding::decode(encoded).unwrap().into_owned()
    } else {
        request
            .body
            .as_ref()
            .and_then(|b| b["q"].as_str())
            .unwrap_or_default()
            .to_string()
    }
}

pub fn google_ok(translated: &str) -> Result<OutboundResponse> {
    Ok(OutboundResponse {
        status: 200,
        body: json!([[[translated, "original", null, null, 10]], null, "en"]).to_string(),
    })
}

pub fn libre_ok(translated: &str) -> Result<OutboundResponse> {
    Ok(OutboundResponse {
        status: 200,
        body: json!({ "translatedText": translated }).to_string(),
    })
}

pub fn http_error(status: u16) -> Result<OutboundResponse> {
    Ok(OutboundResponse {
        status,
        body: json!({ "error": "upstream unavailable" }).to_string(),
    })
}

pub fn network_error() -> Result<OutboundResponse> {
    Err(TranslateError::Provider("HTTP error: connection refused".to_string()))
}

/// Reply from whichever provider was asked.
pub fn reply(request: &OutboundRequest, translated: &str) -> Result<OutboundResponse> {
    if is_google(request) {
        google_ok(translated)
    } else {
        libre_ok(translated)
    }
}

/// Fake translation: the input with a marker prefix, never an echo.
pub fn mark(text: &str) -> String {
    format!("TR: {}", text)
}

pub fn translator(transport: Arc<FakeTransport>) -> Translator {
    Translator::with_transport(&AppConfig::default(), transport)
}
