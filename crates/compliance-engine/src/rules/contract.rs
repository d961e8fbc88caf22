// Indian Contract Act, 1872
use shared_types::Severity;

use super::ViolationRule;
use crate::patterns::{PENALTY_KEYWORDS, UNCONSCIONABLE_KEYWORDS};

/// Penalty not proportionate to actual loss, § 74
pub const EXCESSIVE_PENALTY: ViolationRule = ViolationRule {
    id: "excessive_penalty",
    keywords: PENALTY_KEYWORDS,
    government_clause: "Indian Contract Act, 1872 - Section 74",
    description: "Penalty clauses that are excessive and not proportionate to actual loss",
    severity: Severity::Major,
};

/// Undue influence / unconscionable bargains, § 16
pub const UNCONSCIONABLE_TERMS: ViolationRule = ViolationRule {
    id: "unconscionable_terms",
    keywords: UNCONSCIONABLE_KEYWORDS,
    government_clause: "Indian Contract Act, 1872 - Section 16",
    description: "Terms that are unconscionable or heavily favor one party",
    severity: Severity::Critical,
};
