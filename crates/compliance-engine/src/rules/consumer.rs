// Consumer Protection Act, 2019
use shared_types::Severity;

use super::ViolationRule;
use crate::patterns::{MISLEADING_KEYWORDS, UNFAIR_TERMS_KEYWORDS};

/// Unfair contract terms, § 2(47)
pub const UNFAIR_CONTRACT_TERMS: ViolationRule = ViolationRule {
    id: "unfair_contract_terms",
    keywords: UNFAIR_TERMS_KEYWORDS,
    government_clause: "Consumer Protection Act, 2019 - Section 2(47)",
    description: "Unfair contract terms that are detrimental to consumer interests",
    severity: Severity::Major,
};

/// Misleading or deceptive practices, § 2(1)
pub const MISLEADING_TERMS: ViolationRule = ViolationRule {
    id: "misleading_terms",
    keywords: MISLEADING_KEYWORDS,
    government_clause: "Consumer Protection Act, 2019 - Section 2(1)",
    description: "Misleading or deceptive practices in consumer contracts",
    severity: Severity::Major,
};
