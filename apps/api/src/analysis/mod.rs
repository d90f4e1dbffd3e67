//! Helpers around the AI analysis call the client makes.
//!
//! The model is invoked elsewhere; this module only turns what it sent back
//! (message content, possibly fenced) into a JSON value for the transformer.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("AI response contained no text")]
    EmptyResponse,

    #[error("AI response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Keeps an explicit `null` as `Some(Value::Null)`. Paired with
/// `#[serde(default)]`, only a missing field is `None`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// AI output attached to a request: either already-parsed `feedback`, or the
/// raw message `response` (a string or an array of content blocks).
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisInput {
    #[serde(default, deserialize_with = "present")]
    pub feedback: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl AnalysisInput {
    /// Resolves to the feedback payload. `Ok(None)` when neither field was sent.
    /// `feedback` wins when both are present.
    pub fn into_payload(self) -> Result<Option<Value>, AnalysisError> {
        resolve_payload(self.feedback, self.response)
    }
}

/// An already-parsed value wins; otherwise the raw model response is
/// flattened to text and parsed.
pub fn resolve_payload(
    parsed: Option<Value>,
    response: Option<Value>,
) -> Result<Option<Value>, AnalysisError> {
    if let Some(value) = parsed {
        return Ok(Some(value));
    }
    match response {
        Some(content) => extract_json(&message_text(&content)).map(Some),
        None => Ok(None),
    }
}

/// Flattens message content into text. Blocks may be strings or objects with a
/// `text` or `content` field; anything else contributes nothing.
pub fn message_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(|block| match block {
                Value::String(text) => Some(text.as_str()),
                _ => block
                    .get("text")
                    .and_then(Value::as_str)
                    .or_else(|| block.get("content").and_then(Value::as_str)),
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Parses model output as JSON, preferring the first ``` fenced block if any.
pub fn extract_json(text: &str) -> Result<Value, AnalysisError> {
    let candidate = fenced_block(text.trim()).unwrap_or(text.trim());
    if candidate.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(serde_json::from_str(candidate)?)
}

/// Body of the first ```…``` block, minus an optional `json` tag.
fn fenced_block(text: &str) -> Option<&str> {
    const FENCE: &str = "```";
    let start = text.find(FENCE)? + FENCE.len();
    let rest = &text[start..];
    let end = rest.find(FENCE)?;
    let body = &rest[..end];
    let body = match body.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &body[4..],
        _ => body,
    };
    Some(body.trim())
}
