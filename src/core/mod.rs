//! Core utilities for the ingestion pipeline
//!
//! This module consolidates plumbing shared by every job:
//! - `http`: stats-service client construction
//! - `logging`: tracing subscriber setup
//! - `pacing`: randomized politeness delays
//! - `retry`: bounded exponential-backoff retry

pub mod http;
pub mod logging;
pub mod pacing;
pub mod retry;

// Re-export commonly used items for convenience
pub use pacing::Pacer;
pub use retry::{with_retries, RetryPolicy};
