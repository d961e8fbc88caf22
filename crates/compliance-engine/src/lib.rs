//! Rule-based violation detection
//!
//! A static table of keyword rules, each citing an Indian statute. Scanning
//! is a pure substring check on the lower-cased text: no NLP and no position
//! tracking. It runs independently of any model call, so its findings are
//! available even when the generative model returns garbage.

pub mod patterns;
pub mod rules;

use shared_types::Violation;

pub use rules::{ViolationRule, RULES, RULE_RECOMMENDATION};

/// ComplianceEngine entry point
#[derive(Debug, Clone, Copy)]
pub struct ComplianceEngine {
    rules: &'static [ViolationRule],
}

impl ComplianceEngine {
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// Scan `text` against every rule.
    ///
    /// For each rule, each keyword present in the text yields exactly one
    /// violation whose `clause` is the keyword itself. Deterministic, never
    /// fails, empty when nothing matches.
    pub fn scan(&self, text: &str) -> Vec<Violation> {
        let text_lower = text.to_lowercase();
        self.rules
            .iter()
            .flat_map(|rule| rule.check(&text_lower))
            .collect()
    }

    /// The rule table this engine scans with
    pub fn rules(&self) -> &'static [ViolationRule] {
        self.rules
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}
