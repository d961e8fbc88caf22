//! Strict parsing of the model's analysis reply
//!
//! The model is asked for a JSON object but may wrap it in a markdown code
//! fence, sprinkle control characters into it, or leave fields out. This
//! stage accepts anything that is a JSON object after fence stripping and
//! coerces each field into the typed [`Analysis`]; anything else is a
//! [`ShapeError`] for the caller to route into the fallback.

use serde_json::{Map, Value};
use shared_types::{Analysis, Highlight, HighlightKind, RiskLevel, Severity, TextSpan, Violation};

use crate::error::ShapeError;

/// Summary used when the reply has no usable `summary` string
pub const DEFAULT_SUMMARY: &str = "Document analysis completed.";

/// Remove a markdown code fence around the payload.
///
/// A ```` ```json ```` fence wins; otherwise the text between the first two
/// bare ```` ``` ```` markers is taken. Unfenced input is returned unchanged.
pub fn strip_code_fences(raw: &str) -> &str {
    if let Some((_, after)) = raw.split_once("```json") {
        after.split("```").next().unwrap_or(after)
    } else if raw.contains("```") {
        raw.split("```").nth(1).unwrap_or(raw)
    } else {
        raw
    }
}

/// Parse a model reply into an [`Analysis`].
pub fn parse_analysis(raw: &str) -> Result<Analysis, ShapeError> {
    let cleaned: String = strip_code_fences(raw)
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .collect();

    let value: Value = serde_json::from_str(&cleaned)?;
    let object = value.as_object().ok_or(ShapeError::NotAnObject)?;

    Ok(Analysis {
        summary: str_field(object, "summary")
            .unwrap_or(DEFAULT_SUMMARY)
            .to_string(),
        key_points: string_list(object.get("keyPoints")),
        risk_level: str_field(object, "riskLevel")
            .map(RiskLevel::from)
            .unwrap_or_default(),
        risk_explanation: str_field(object, "riskExplanation")
            .unwrap_or_default()
            .to_string(),
        violations: object_list(object.get("violations"))
            .map(violation_from)
            .collect(),
        highlights: object_list(object.get("highlights"))
            .map(highlight_from)
            .collect(),
        recommendations: string_list(object.get("recommendations")),
    })
}

fn str_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn owned_str(object: &Map<String, Value>, key: &str) -> String {
    str_field(object, key).unwrap_or_default().to_string()
}

/// String elements of an array; anything else is dropped
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Object elements of an array; anything else is dropped
fn object_list(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn violation_from(object: &Map<String, Value>) -> Violation {
    Violation {
        clause: owned_str(object, "clause"),
        violation: owned_str(object, "violation"),
        severity: str_field(object, "severity")
            .map(Severity::from)
            .unwrap_or_default(),
        explanation: owned_str(object, "explanation"),
        government_clause: owned_str(object, "governmentClause"),
        recommendation: str_field(object, "recommendation").map(str::to_string),
    }
}

fn highlight_from(object: &Map<String, Value>) -> Highlight {
    Highlight {
        text: owned_str(object, "text"),
        explanation: owned_str(object, "explanation"),
        kind: str_field(object, "type")
            .map(HighlightKind::from)
            .unwrap_or_default(),
        position: object
            .get("position")
            .and_then(Value::as_object)
            .and_then(span_from),
    }
}

/// Offsets must be non-negative integers; range checks against the text
/// happen where the highlight is consumed.
fn span_from(position: &Map<String, Value>) -> Option<TextSpan> {
    let start = position.get("start")?.as_u64()?;
    let end = position.get("end")?.as_u64()?;
    Some(TextSpan {
        start: usize::try_from(start).ok()?,
        end: usize::try_from(end).ok()?,
    })
}
