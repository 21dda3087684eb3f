//! Response extraction: turns untrusted LLM text into a JSON array, or a fallback.
//!
//! The model is asked for JSON only but regularly answers with prose, wraps
//! the JSON in markdown fences, or truncates it. Callers never see any of that:
//! `generate_or_fallback` either yields the parsed value or the caller's
//! deterministic template, and logs which one it was.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::llm_client::{LlmError, LlmGateway};

/// Longest slice of raw model output copied into a log line.
const LOG_PREVIEW_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("LLM call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("field `{0}` is missing or not an array")]
    NotAnArray(&'static str),

    #[error("field `{0}` is an empty array")]
    Empty(&'static str),

    #[error("element {index} of `{field}` has the wrong shape: {reason}")]
    BadElement {
        field: &'static str,
        index: usize,
        reason: String,
    },
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Anything after the closing fence is dropped.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    let body = match body.find("```") {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim()
}

/// Parses `text` as a JSON object whose `field` is a non-empty array and
/// returns the whole object, so callers can also read sibling fields.
pub fn extract_document(text: &str, field: &'static str) -> Result<Map<String, Value>, ExtractError> {
    let value: Value = serde_json::from_str(strip_json_fences(text))?;
    let Value::Object(doc) = value else {
        return Err(ExtractError::NotAnObject);
    };
    match doc.get(field) {
        Some(Value::Array(items)) if items.is_empty() => Err(ExtractError::Empty(field)),
        Some(Value::Array(_)) => Ok(doc),
        _ => Err(ExtractError::NotAnArray(field)),
    }
}

/// Parses `text` and returns the non-empty array stored under `field`, verbatim.
pub fn extract_array(text: &str, field: &'static str) -> Result<Vec<Value>, ExtractError> {
    let mut doc = extract_document(text, field)?;
    match doc.remove(field) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(ExtractError::NotAnArray(field)),
    }
}

/// Asks the gateway, parses the answer with `parse`, and substitutes
/// `fallback()` on any failure. Never returns an error.
pub async fn generate_or_fallback<T>(
    llm: &dyn LlmGateway,
    prompt: &str,
    system: &str,
    what: &str,
    parse: impl FnOnce(&str) -> Result<T, ExtractError>,
    fallback: impl FnOnce() -> T,
) -> T {
    let raw = match llm.complete(prompt, system).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("Failed to generate {what}, using fallback: {e}");
            return fallback();
        }
    };

    match parse(&raw) {
        Ok(value) => {
            debug!("Parsed {what} from LLM response");
            value
        }
        Err(e) => {
            error!(
                "Failed to parse {what}, using fallback: {e}; response: {}",
                preview(&raw)
            );
            fallback()
        }
    }
}

fn preview(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
