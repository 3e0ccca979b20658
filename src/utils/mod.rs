//! Utility functions and helpers for news2tr.
//!
//! This module provides cross-cutting concerns like structured logging,
//! secret redaction, and retry logic with backoff.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and API key redaction.
//! - `retry`: Exponential backoff retry for provider calls.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod retry;
