//! Transcript summarization via the Cohere API
//!
//! A stateless relay: validate the input, pad it to the upstream minimum,
//! forward with fixed parameters, and hand back the summary or the upstream
//! failure detail. No retries, no caching.

pub mod client;
pub mod messages;

pub use client::{pad_to_minimum, SummarizeClient, SummarizeError, MIN_UPSTREAM_CHARS};
pub use messages::{UpstreamRequest, UpstreamResponse};
