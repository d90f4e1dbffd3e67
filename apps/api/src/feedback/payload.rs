//! Raw AI feedback payloads and the schema detector.
//!
//! Model output arrives loosely typed. Every field here decodes leniently: a
//! missing or wrongly typed value becomes `None` / empty instead of failing the
//! whole payload, so the reconcilers only ever see optional fields.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoders
// ────────────────────────────────────────────────────────────────────────────

/// Any JSON number becomes `Some(f64)`. Strings, booleans and null are `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Keeps the string entries of an array. Non-arrays yield an empty list.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(&Value::deserialize(deserializer)?))
}

fn lenient_tips<'de, D>(deserializer: D) -> Result<Option<Vec<RawTip>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(RawTip::from).collect()),
        _ => None,
    })
}

/// Decodes a nested object, falling back to the default for any other shape.
/// Arrays are refused up front so they never fill struct fields positionally.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

// ────────────────────────────────────────────────────────────────────────────
// Tips
// ────────────────────────────────────────────────────────────────────────────

/// A tip as the model sent it: a bare string or a partially formed object.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTip {
    Text(String),
    Entry {
        kind: Option<String>,
        tip: Option<String>,
        explanation: Option<String>,
    },
}

impl From<Value> for RawTip {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawTip::Text(s),
            Value::Object(map) => RawTip::Entry {
                kind: map.get("type").and_then(Value::as_str).map(String::from),
                tip: map.get("tip").and_then(non_empty_str),
                explanation: map.get("explanation").and_then(non_empty_str),
            },
            // Numbers, arrays and the like carry nothing usable.
            _ => RawTip::Entry {
                kind: None,
                tip: None,
                explanation: None,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Modern schema
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_tips")]
    pub tips: Option<Vec<RawTip>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAts {
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_tips")]
    pub tips: Option<Vec<RawTip>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub keyword_match: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub formatting_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub readability_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub compliance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub parsing_confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub matched_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub missing_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub red_flags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub priority_fixes: Vec<String>,
}

/// Payload that structurally mirrors `Feedback`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernPayload {
    #[serde(default, deserialize_with = "lenient_number")]
    pub overall_score: Option<f64>,
    #[serde(default, rename = "ATS", deserialize_with = "lenient")]
    pub ats: Option<RawAts>,
    #[serde(default, deserialize_with = "lenient")]
    pub tone_and_style: Option<RawCategory>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<RawCategory>,
    #[serde(default, deserialize_with = "lenient")]
    pub structure: Option<RawCategory>,
    #[serde(default, deserialize_with = "lenient")]
    pub skills: Option<RawCategory>,
}

// ────────────────────────────────────────────────────────────────────────────
// Legacy schema (0–10 ratings plus free-text buckets)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordAnalysis {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub present_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailedFeedback {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub improvement_suggestions: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub keyword_analysis: KeywordAnalysis,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPayload {
    #[serde(default, deserialize_with = "lenient_number")]
    pub overall_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ats_compatibility: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub relevance_to_job: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub format_and_design: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub content_quality: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub detailed_feedback: DetailedFeedback,
}

// ────────────────────────────────────────────────────────────────────────────
// Schema detection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    Modern,
    Legacy,
}

/// Modern iff `ATS.keywordMatch` is a number AND `toneAndStyle.tips` is an array.
/// Both conditions are required.
pub fn is_modern(raw: &Value) -> bool {
    let has_keyword_match = raw
        .get("ATS")
        .and_then(|ats| ats.get("keywordMatch"))
        .is_some_and(Value::is_number);
    let has_tone_tips = raw
        .get("toneAndStyle")
        .and_then(|tone| tone.get("tips"))
        .is_some_and(Value::is_array);
    has_keyword_match && has_tone_tips
}

pub fn detect_schema(raw: &Value) -> SchemaKind {
    if is_modern(raw) {
        SchemaKind::Modern
    } else {
        SchemaKind::Legacy
    }
}

/// A raw payload resolved once into the variant its reconciler expects.
#[derive(Debug, Clone)]
pub enum FeedbackPayload {
    Modern(ModernPayload),
    Legacy(LegacyPayload),
    Empty,
}

impl FeedbackPayload {
    pub fn from_value(raw: &Value) -> Self {
        if raw.is_null() {
            return FeedbackPayload::Empty;
        }
        if is_modern(raw) {
            return FeedbackPayload::Modern(ModernPayload::deserialize(raw).unwrap_or_default());
        }
        // Non-object payloads (strings, numbers, arrays) carry no legacy fields.
        let legacy = if raw.is_object() {
            LegacyPayload::deserialize(raw).unwrap_or_default()
        } else {
            LegacyPayload::default()
        };
        FeedbackPayload::Legacy(legacy)
    }

    pub fn schema(&self) -> SchemaKind {
        match self {
            FeedbackPayload::Modern(_) => SchemaKind::Modern,
            FeedbackPayload::Legacy(_) | FeedbackPayload::Empty => SchemaKind::Legacy,
        }
    }
}
