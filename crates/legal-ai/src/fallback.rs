//! Heuristic analysis for replies that failed strict parsing
//!
//! Never fails. Salvages what it can from the raw reply (a `"summary"` value,
//! a "high risk"/"low risk" mention) and builds highlights directly from the
//! document text, so the user still gets something to read.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Analysis, Highlight, HighlightKind, RiskLevel, TextSpan};

/// Legal terms scanned for in the document text, in reporting order
pub const IMPORTANT_TERMS: &[&str] = &[
    "termination",
    "penalty",
    "liability",
    "payment",
    "refund",
    "cancellation",
    "breach",
    "damages",
    "warranty",
    "guarantee",
];

const MATCHES_PER_TERM: usize = 2;
const MAX_HIGHLIGHTS: usize = 10;

pub const FALLBACK_SUMMARY: &str = "**Document Overview**
• This document contains legal terms and conditions that require careful review
• Multiple clauses may impact your rights and obligations

**Key Concerns**
• Complex legal language that may be difficult to understand
• Potential risks that need professional evaluation

**Recommendation**
• Consider consulting with a legal professional for detailed analysis";

const FALLBACK_KEY_POINTS: [&str; 5] = [
    "Document contains legal obligations and terms",
    "Review all clauses carefully before signing",
    "Consider consulting a legal professional",
    "Pay attention to termination and penalty clauses",
    "Understand your rights and responsibilities",
];

const FALLBACK_RISK_EXPLANATION: &str = "Risk assessment based on document complexity and terms";

const FALLBACK_RECOMMENDATIONS: [&str; 4] = [
    "Read the entire document carefully",
    "Ask questions about unclear terms",
    "Consider legal consultation for complex agreements",
    "Keep a copy of all signed documents",
];

lazy_static! {
    /// `"summary": "..."` anywhere in the raw reply
    static ref SUMMARY_FIELD: Regex = Regex::new(r#"(?i)"summary":\s*"([^"]*)""#).unwrap();

    /// Whole-word term followed by the rest of its sentence
    static ref TERM_SENTENCES: Vec<(&'static str, Regex)> = IMPORTANT_TERMS
        .iter()
        .map(|term| (*term, Regex::new(&format!(r"(?i)\b{}\b[^.]*\.", term)).unwrap()))
        .collect();
}

/// Build an analysis from a reply that could not be parsed.
///
/// `raw` is the model's reply, `original_text` the document text the
/// highlights are taken from.
pub fn fallback_analysis(raw: &str, original_text: &str) -> Analysis {
    let summary = SUMMARY_FIELD
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_SUMMARY)
        .to_string();

    let raw_lower = raw.to_lowercase();
    let risk_level = if raw_lower.contains("high risk") {
        RiskLevel::High
    } else if raw_lower.contains("low risk") {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    };

    Analysis {
        summary,
        key_points: FALLBACK_KEY_POINTS.iter().map(|s| s.to_string()).collect(),
        risk_level,
        risk_explanation: FALLBACK_RISK_EXPLANATION.to_string(),
        violations: Vec::new(),
        highlights: term_highlights(original_text),
        recommendations: FALLBACK_RECOMMENDATIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Sentences mentioning one of [`IMPORTANT_TERMS`].
///
/// Positions are character offsets of the actual match, so every highlight
/// points at its own occurrence even when the same sentence repeats.
pub fn term_highlights(text: &str) -> Vec<Highlight> {
    TERM_SENTENCES
        .iter()
        .flat_map(|(term, pattern)| {
            pattern
                .find_iter(text)
                .take(MATCHES_PER_TERM)
                .map(move |m| {
                    let start = text[..m.start()].chars().count();
                    let end = start + m.as_str().chars().count();
                    Highlight {
                        text: m.as_str().trim().to_string(),
                        explanation: format!(
                            "This clause relates to {} - important for understanding your obligations.",
                            term
                        ),
                        kind: HighlightKind::Important,
                        position: Some(TextSpan { start, end }),
                    }
                })
        })
        .take(MAX_HIGHLIGHTS)
        .collect()
}
