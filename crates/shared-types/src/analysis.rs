//! Analysis record embedded in a [`crate::Document`]

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Result of analysing one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_explanation: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Coarse overall risk classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        RiskLevel::from(value.as_str())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violation severity.
///
/// Two vocabularies coexist in stored records: `minor|major|critical` (what
/// the rule engine and the model prompt produce) and the legacy
/// `low|medium|high`. Both are accepted and kept as-is; no producer in this
/// workspace emits the legacy values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    #[default]
    Minor,
    Major,
    Critical,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// True for the `low|medium|high` alias values.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Severity::Low | Severity::Medium | Severity::High)
    }

    /// Map legacy aliases onto `minor|major|critical`.
    pub fn canonical(&self) -> Severity {
        match self {
            Severity::Low => Severity::Minor,
            Severity::Medium => Severity::Major,
            Severity::High => Severity::Critical,
            other => *other,
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "major" => Severity::Major,
            "critical" => Severity::Critical,
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            _ => Severity::Minor,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Severity::from(value.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clause flagged as conflicting with a named regulation.
///
/// `clause` is the merge key: within one analysis no two violations share it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(default)]
    pub clause: String,
    #[serde(default)]
    pub violation: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub government_clause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Category tag of a highlight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum HighlightKind {
    #[default]
    Important,
    Warning,
    Violation,
    Clarification,
}

impl From<&str> for HighlightKind {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "warning" => HighlightKind::Warning,
            "violation" => HighlightKind::Violation,
            "clarification" => HighlightKind::Clarification,
            _ => HighlightKind::Important,
        }
    }
}

impl From<String> for HighlightKind {
    fn from(value: String) -> Self {
        HighlightKind::from(value.as_str())
    }
}

/// Half-open character range `[start, end)` into the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    /// The span as a character range, if it lies inside `text`.
    pub fn within(&self, text: &str) -> Option<Range<usize>> {
        let len = text.chars().count();
        (self.start < self.end && self.end <= len).then_some(self.start..self.end)
    }
}

/// A span of original text annotated with an explanatory note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(rename = "type", default)]
    pub kind: HighlightKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TextSpan>,
}

impl Highlight {
    /// Character range of this highlight in `text`.
    ///
    /// Returns `None` ("position unknown") when no position was recorded or
    /// the recorded one falls outside the text.
    pub fn span_in(&self, text: &str) -> Option<Range<usize>> {
        self.position.and_then(|span| span.within(text))
    }
}
