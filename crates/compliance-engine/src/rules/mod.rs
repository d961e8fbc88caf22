//! Regulatory keyword rules
//!
//! Each rule cites one Indian statute. The table order in [`RULES`] is the
//! order violations are reported in.

pub mod consumer;
pub mod contract;
pub mod privacy;

use serde::Serialize;
use shared_types::{Severity, Violation};

use crate::patterns::matched_keywords;

/// Advice attached to every rule-based violation
pub const RULE_RECOMMENDATION: &str = "Consider seeking legal advice regarding this clause as it may not be enforceable under Indian law.";

/// One entry of the static rule table
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRule {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    /// Statute cited, e.g. "Indian Contract Act, 1872 - Section 74"
    pub government_clause: &'static str,
    pub description: &'static str,
    pub severity: Severity,
}

impl ViolationRule {
    /// One violation per keyword of this rule found in `text_lower`.
    pub fn check(&self, text_lower: &str) -> Vec<Violation> {
        matched_keywords(text_lower, self.keywords)
            .map(|keyword| self.violation_for(keyword))
            .collect()
    }

    fn violation_for(&self, keyword: &str) -> Violation {
        Violation {
            clause: keyword.to_string(),
            violation: self.description.to_string(),
            severity: self.severity,
            explanation: format!(
                "This clause may violate {}. {}",
                self.government_clause, self.description
            ),
            government_clause: self.government_clause.to_string(),
            recommendation: Some(RULE_RECOMMENDATION.to_string()),
        }
    }
}

/// The full rule table, in reporting order
pub const RULES: &[ViolationRule] = &[
    consumer::UNFAIR_CONTRACT_TERMS,
    contract::EXCESSIVE_PENALTY,
    privacy::PRIVACY_VIOLATION,
    consumer::MISLEADING_TERMS,
    contract::UNCONSCIONABLE_TERMS,
];
