// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    batch_handler, health_handler, metrics_handler, summarize_handler, translate_handler,
};
use crate::config::AppConfig;
use crate::translation::Translator;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub translator: Translator,
}

pub fn create_router(config: AppConfig, translator: Translator) -> Router {
    let body_limit = config.server.body_limit_bytes;
    let state = AppState { config, translator };

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/translate", post(translate_handler))
        .route("/translate/batch", post(batch_handler))
        .route("/summarize", post(summarize_handler))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
