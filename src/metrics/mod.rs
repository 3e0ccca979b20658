// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    PROVIDER_CALLS,
    PROVIDER_DURATION,
    TRANSLATIONS_TOTAL,
    SANITIZER_FALLBACKS,
};

/// Helper to record inbound request metrics
pub fn record_request(endpoint: &str, status_code: u16) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status_code.to_string()])
        .inc();
}

/// Helper to record one provider attempt
pub fn record_provider_call(provider: &str, outcome: &str, duration_secs: f64) {
    PROVIDER_CALLS.with_label_values(&[provider, outcome]).inc();
    PROVIDER_DURATION
        .with_label_values(&[provider])
        .observe(duration_secs);
}

pub fn record_translation(outcome: &str) {
    TRANSLATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_sanitizer_fallback() {
    SANITIZER_FALLBACKS.inc();
}
