//! Axum-based HTTP server for news2tr.
//!
//! Exposes the translation pipeline over JSON endpoints.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations (translate, batch, summarize, health, metrics).
//! - `routes`: The router, with request ID, tracing, CORS and body limit layers.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod routes;

pub use routes::{create_router, AppState};
