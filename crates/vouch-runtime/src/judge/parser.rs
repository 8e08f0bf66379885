//! Defensive parsing of the judge's untrusted reply.
//!
//! The judge promises JSON but routinely wraps it in Markdown fences, adds
//! prose around it, emits trailing commas, or embeds control characters.
//! Each pipeline stage either salvages the reply or short-circuits into a
//! [`ParseFailure`] whose message carries a short diagnostic (length and
//! prefix, never the full content).

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// How much of the reply prefix is quoted in diagnostics.
const DIAGNOSTIC_PREFIX_CHARS: usize = 40;

lazy_static! {
    /// Trailing comma before a closing brace or bracket.
    static ref TRAILING_COMMA: Regex = Regex::new(r",\s*([}\]])").expect("static regex");
}

/// Why a judge reply could not be parsed. Recoverable by design: the caller
/// degrades to heuristics-only and records the reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("judge reply was empty")]
    Empty,

    #[error("no JSON payload in reply (length {len}, starts {prefix:?})")]
    NoJson { len: usize, prefix: String },

    #[error("invalid JSON even after sanitizing: {detail} (reply length {len})")]
    InvalidJson { len: usize, detail: String },

    #[error("unexpected reply shape: {shape}")]
    NotAnArray { shape: String },
}

/// One judge rubric entry as found in the reply, before clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCriterion {
    pub criterion: String,
    pub score: i64,
    pub confidence: f64,
    pub reasoning: String,
}

/// Run the full parse pipeline over a raw judge reply.
pub fn parse_reply(raw: &str) -> Result<Vec<RawCriterion>, ParseFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let unfenced = strip_code_fences(trimmed);

    let payload = extract_payload(unfenced).ok_or_else(|| ParseFailure::NoJson {
        len: raw.len(),
        prefix: trimmed.chars().take(DIAGNOSTIC_PREFIX_CHARS).collect(),
    })?;

    let value: JsonValue = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(first_err) => {
            let sanitized = sanitize(payload);
            tracing::debug!(error = %first_err, "strict JSON parse failed, retrying sanitized");
            serde_json::from_str(&sanitized).map_err(|e| ParseFailure::InvalidJson {
                len: raw.len(),
                detail: e.to_string(),
            })?
        }
    };

    let entries = match value {
        JsonValue::Array(entries) => entries,
        JsonValue::Object(mut map) => match map.remove("evaluations") {
            Some(JsonValue::Array(entries)) => entries,
            Some(other) => {
                return Err(ParseFailure::NotAnArray {
                    shape: format!("'evaluations' field is {}, not an array", shape_of(&other)),
                })
            }
            None => {
                return Err(ParseFailure::NotAnArray {
                    shape: "object without an 'evaluations' array".to_string(),
                })
            }
        },
        other => {
            return Err(ParseFailure::NotAnArray {
                shape: shape_of(&other).to_string(),
            })
        }
    };

    Ok(entries.iter().filter_map(raw_criterion).collect())
}

/// Map one array entry to a raw criterion. Entries without a usable name
/// are dropped; missing score/confidence fall back to neutral values.
fn raw_criterion(entry: &JsonValue) -> Option<RawCriterion> {
    let criterion = entry
        .get("criterion")
        .or_else(|| entry.get("name"))
        .and_then(JsonValue::as_str)?
        .trim()
        .to_string();
    if criterion.is_empty() {
        return None;
    }

    let score = entry
        .get("score")
        .and_then(JsonValue::as_f64)
        .map(|s| s.round() as i64)
        .unwrap_or(3);
    let confidence = entry
        .get("confidence")
        .and_then(JsonValue::as_f64)
        .unwrap_or(0.5);
    let reasoning = entry
        .get("reasoning")
        .and_then(JsonValue::as_str)
        .unwrap_or("")
        .to_string();

    Some(RawCriterion {
        criterion,
        score,
        confidence,
        reasoning,
    })
}

/// Strip a surrounding Markdown code fence, with or without a language tag.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }

    let after_open = match text.find('\n') {
        Some(idx) => &text[idx + 1..],
        None => return text,
    };
    match after_open.rfind("```") {
        Some(idx) => after_open[..idx].trim(),
        None => after_open.trim(),
    }
}

/// Extract the first balanced-looking `{...}` or `[...]` substring.
///
/// Depth counting only; brace characters inside JSON strings can fool it,
/// in which case the strict parse fails and the reply is skipped with a
/// reason, which is the intended degradation.
fn extract_payload(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let mut depth = 0usize;
    for (offset, c) in text[start..].char_indices() {
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Best-effort cleanup for almost-JSON: strip markup characters and control
/// characters, remove trailing commas.
fn sanitize(payload: &str) -> String {
    let stripped: String = payload
        .chars()
        .filter(|&c| !matches!(c, '*' | '`') && !c.is_control())
        .collect();
    TRAILING_COMMA.replace_all(&stripped, "$1").into_owned()
}

/// Short shape description for diagnostics.
fn shape_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
