// Translation pipeline tests against an in-memory transport
// Author: kelexine (https://github.com/kelexine)

mod common;

use common::*;
use news2tr::chunker;
use news2tr::config::AppConfig;
use news2tr::models::{Outcome, Sentiment, TargetLang};
use news2tr::sanitize;
use news2tr::Translator;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn test_primary_provider_result_is_used() {
    let transport = FakeTransport::new(|req| {
        if is_google(req) {
            google_ok("Merkez bankası faizi sabit tuttu")
        } else {
            libre_ok("unused libre result")
        }
    });
    let translator = translator(transport.clone());

    let result = translator
        .translate_detailed("Central bank holds rates steady", TargetLang::Tr)
        .await;

    assert_eq!(result.text, "Merkez bankası faizi sabit tuttu");
    assert_eq!(result.outcome, Outcome::Translated { provider: "google" });
    assert_eq!(transport.google_calls(), 1);
    assert_eq!(transport.libre_calls(), 0);
}

#[tokio::test]
async fn test_echoed_primary_result_falls_back() {
    let transport = FakeTransport::new(|req| {
        if is_google(req) {
            // Same text, different case: untranslated
            google_ok(&request_text(req).to_uppercase())
        } else {
            libre_ok("Merkez bankası faizi sabit tuttu")
        }
    });
    let translator = translator(transport.clone());

    let result = translator
        .translate_detailed("Central bank holds rates steady", TargetLang::Tr)
        .await;

    assert_eq!(result.text, "Merkez bankası faizi sabit tuttu");
    assert_eq!(result.outcome, Outcome::Translated { provider: "libretranslate" });
    assert_eq!(transport.google_calls(), 1);
    assert_eq!(transport.libre_calls(), 1);
}

#[tokio::test]
async fn test_primary_error_falls_back() {
    let transport = FakeTransport::new(|req| {
        if is_google(req) {
            http_error(429)
        } else {
            libre_ok("Merkez bankası faizi sabit tuttu")
        }
    });

    let text = translator(transport)
        .translate_to_turkish("Central bank holds rates steady")
        .await;

    assert_eq!(text, "Merkez bankası faizi sabit tuttu");
}

#[tokio::test]
async fn test_short_primary_result_falls_back() {
    let transport = FakeTransport::new(|req| {
        if is_google(req) {
            google_ok("Faiz")
        } else {
            libre_ok("Merkez bankası faizi sabit tuttu")
        }
    });

    let text = translator(transport)
        .translate("Central bank holds rates steady", TargetLang::Tr)
        .await;

    assert_eq!(text, "Merkez bankası faizi sabit tuttu");
}

#[tokio::test]
async fn test_both_failing_returns_sanitized_input() {
    let transport = FakeTransport::new(|req| {
        if is_google(req) {
            network_error()
        } else {
            http_error(503)
        }
    });
    let translator = translator(transport);
    let raw = "<p>Central bank holds rates steady</p> | Example Wire";

    let result = translator.translate_detailed(raw, TargetLang::Tr).await;

    assert_eq!(result.text, sanitize::clean(raw));
    assert_eq!(result.text, "Central bank holds rates steady");
    assert!(result.is_passthrough());
}

#[tokio::test]
async fn test_never_fails_on_odd_input() {
    let transport = FakeTransport::new(|_| network_error());
    let translator = translator(transport);

    for input in ["", "<<<>>>", "|||", "<script>alert(1)</script>", "\u{0}\u{1}", "…"] {
        let out = translator.translate(input, TargetLang::Tr).await;
        assert_eq!(out, sanitize::clean(input));
    }
}

#[tokio::test]
async fn test_unusable_input_skips_providers() {
    let transport = FakeTransport::new(|req| reply(req, "should not be called"));
    let translator = translator(transport.clone());

    let result = translator
        .translate_detailed("<p>Hi</p> https://example.com", TargetLang::Tr)
        .await;

    assert_eq!(result.text, "");
    assert_eq!(result.outcome, Outcome::Skipped);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_target_language_codes() {
    let transport = FakeTransport::new(|req| reply(req, &mark(&request_text(req))));
    let translator = translator(transport.clone());

    translator
        .translate("Merkez bankası faizi sabit tuttu", TargetLang::En)
        .await;

    let calls = transport.calls();
    assert!(calls[0].url.contains("sl=tr&tl=en"));
    assert!(calls[0]
        .headers
        .contains(&("User-Agent".to_string(), "Mozilla/5.0".to_string())));
}

#[tokio::test]
async fn test_long_text_is_chunked_in_order() {
    let transport = FakeTransport::new(|req| reply(req, &mark(&request_text(req))));
    let translator = translator(transport.clone());

    let text = (0..40)
        .map(|i| format!("Sentence number {} reports on the markets.", i))
        .collect::<Vec<_>>()
        .join(" ");
    let chunks = chunker::split(&text, chunker::DEFAULT_CHUNK_LIMIT);
    assert!(chunks.len() > 1);

    let result = translator.translate_detailed(&text, TargetLang::Tr).await;

    let expected = chunks.iter().map(|c| mark(c)).collect::<Vec<_>>().join(" ");
    assert_eq!(result.text, expected);
    assert_eq!(result.outcome, Outcome::Translated { provider: "google" });

    let sent: Vec<String> = transport.calls().iter().map(request_text).collect();
    assert_eq!(sent, chunks);
    assert!(sent.iter().all(|c| c.chars().count() <= chunker::DEFAULT_CHUNK_LIMIT));
}

#[tokio::test]
async fn test_failed_chunk_passes_through() {
    let transport = FakeTransport::new(|req| {
        let text = request_text(req);
        if text.contains("Sentence number 0 ") {
            network_error()
        } else {
            reply(req, &mark(&text))
        }
    });
    let translator = translator(transport);

    let text = (0..40)
        .map(|i| format!("Sentence number {} reports on the markets.", i))
        .collect::<Vec<_>>()
        .join(" ");
    let chunks = chunker::split(&text, chunker::DEFAULT_CHUNK_LIMIT);

    let result = translator.translate_detailed(&text, TargetLang::Tr).await;

    assert_eq!(result.outcome, Outcome::Partial);
    assert!(result.text.starts_with(&chunks[0]));
    assert!(result.text.ends_with(&mark(chunks.last().unwrap())));
}

#[tokio::test]
async fn test_batch_preserves_order_with_failures() {
    let transport = FakeTransport::new(|req| {
        let text = request_text(req);
        if text.starts_with("Beta") {
            network_error()
        } else {
            reply(req, &mark(&text))
        }
    });
    let translator = translator(transport);
    let texts = vec![
        "Alpha exchange lists new token".to_string(),
        "Beta exchange halts withdrawals".to_string(),
        "Gamma fund files for an ETF".to_string(),
    ];

    let out = translator.translate_batch(&texts, TargetLang::Tr).await;

    assert_eq!(
        out,
        vec![
            mark("Alpha exchange lists new token"),
            "Beta exchange halts withdrawals".to_string(),
            mark("Gamma fund files for an ETF"),
        ]
    );
}

#[tokio::test]
async fn test_batch_failure_returns_originals() {
    let transport = FakeTransport::new(|req| {
        let text = request_text(req);
        if text.contains("boom") {
            panic!("transport blew up");
        }
        reply(req, &mark(&text))
    });
    let translator = translator(transport);
    let texts = vec![
        "<b>Alpha</b> exchange lists new token".to_string(),
        "Markets go boom after the open".to_string(),
    ];

    let out = translator.translate_batch(&texts, TargetLang::Tr).await;

    assert_eq!(out, texts);
}

#[tokio::test]
async fn test_summarize_and_translate() {
    let transport = FakeTransport::new(|req| reply(req, &mark(&request_text(req))));
    let translator = translator(transport);

    let result = translator
        .summarize_and_translate(
            "Bitcoin price surges past record | Example Wire",
            Some("<p>Analysts cite strong ETF inflows. More details follow later in the day.</p>"),
            TargetLang::Tr,
        )
        .await;

    assert_eq!(result.sentiment, Sentiment::Positive);
    assert_eq!(
        result.summary,
        mark("Bitcoin price surges past record. Analysts cite strong ETF inflows. More details follow later in the day.")
    );
}

#[tokio::test]
async fn test_summarize_without_providers_passes_through() {
    let transport = FakeTransport::new(|_| network_error());
    let translator = translator(transport);

    let result = translator
        .summarize_and_translate("Exchange hack causes market crash", None, TargetLang::Tr)
        .await;

    assert_eq!(result.sentiment, Sentiment::Negative);
    assert_eq!(result.summary, "Exchange hack causes market crash");
}

#[tokio::test]
async fn test_summarize_keeps_short_title() {
    let transport = FakeTransport::new(|_| network_error());
    let translator = translator(transport.clone());

    let result = translator
        .summarize_and_translate(
            "Fed hikes",
            Some("The central bank raised rates by a quarter point."),
            TargetLang::Tr,
        )
        .await;
    assert_eq!(
        result.summary,
        "Fed hikes. The central bank raised rates by a quarter point."
    );

    // Too short for a provider call, returned as is
    let calls_before = transport.calls().len();
    let result = translator
        .summarize_and_translate("<b>BTC up 5%</b> | Wire", None, TargetLang::Tr)
        .await;
    assert_eq!(result.summary, "BTC up 5%");
    assert_eq!(transport.calls().len(), calls_before);
}

#[tokio::test]
async fn test_summarize_sentiment_ignores_markup() {
    let transport = FakeTransport::new(|req| reply(req, &mark(&request_text(req))));
    let translator = translator(transport);

    let result = translator
        .summarize_and_translate(
            "Quarterly report released",
            Some(r#"<p class="crash-banner">Figures were published.</p><script>hack()</script>"#),
            TargetLang::Tr,
        )
        .await;

    assert_eq!(result.sentiment, Sentiment::Neutral);
    assert_eq!(
        result.summary,
        mark("Quarterly report released. Figures were published.")
    );
}

#[tokio::test]
async fn test_retry_is_opt_in() {
    let attempts = std::sync::Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let transport = FakeTransport::new(move |req| {
        if is_google(req) && counter.fetch_add(1, Ordering::SeqCst) < 2 {
            http_error(503)
        } else {
            reply(req, "Merkez bankası faizi sabit tuttu")
        }
    });

    let mut config = AppConfig::default();
    config.retry.enabled = true;
    config.retry.base_delay_ms = 1;
    let translator = Translator::with_transport(&config, transport.clone());

    let result = translator
        .translate_detailed("Central bank holds rates steady", TargetLang::Tr)
        .await;

    assert_eq!(result.outcome, Outcome::Translated { provider: "google" });
    assert_eq!(transport.google_calls(), 3);
    assert_eq!(transport.libre_calls(), 0);
}

#[tokio::test]
async fn test_without_retry_first_failure_falls_through() {
    let transport = FakeTransport::new(|req| {
        if is_google(req) {
            http_error(503)
        } else {
            libre_ok("Merkez bankası faizi sabit tuttu")
        }
    });
    let translator = translator(transport.clone());

    translator
        .translate("Central bank holds rates steady", TargetLang::Tr)
        .await;

    assert_eq!(transport.google_calls(), 1);
    assert_eq!(transport.libre_calls(), 1);
}
