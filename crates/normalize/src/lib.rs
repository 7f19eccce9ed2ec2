//! Brandscan response normalization layer.
//!
//! Language-model providers wrap their generated text in very different
//! envelopes. This crate flattens any of them into a single plain-text string
//! so the segmenter and matcher never have to care which vendor answered.
//!
//! ## What we do
//!
//! - Classify the payload into a [`RawResponse`] variant (see [`types`] for
//!   the detection order)
//! - Render the variant into text, joining multi-part content with newlines
//! - Fall back to the stringified payload when no shape is recognized
//!
//! ## Never fails
//!
//! [`normalize`] has no error type. Unknown shapes degrade to their JSON
//! rendering; callers treat an empty string as "no content".
//!
//! ```rust
//! use normalize::normalize;
//! use serde_json::json;
//!
//! let raw = json!({ "choices": [{ "message": { "content": "1. Acme" } }] });
//! assert_eq!(normalize(&raw), "1. Acme");
//! ```

pub mod types;

use serde_json::Value;

pub use crate::types::{RawResponse, ResponseShape};

/// Flatten a provider payload into plain text.
pub fn normalize(raw: &Value) -> String {
    let response = RawResponse::classify(raw);
    tracing::debug!(shape = response.shape().as_str(), "classified provider response");
    response.into_text()
}

/// Turn a payload that arrived as raw bytes into a JSON value.
///
/// Bodies that parse as JSON are returned parsed; anything else is already
/// plain text and becomes a JSON string.
pub fn parse_payload(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
