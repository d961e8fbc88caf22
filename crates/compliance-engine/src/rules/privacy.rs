// Information Technology Act, 2000
use shared_types::Severity;

use super::ViolationRule;
use crate::patterns::PRIVACY_KEYWORDS;

pub const PRIVACY_VIOLATION: ViolationRule = ViolationRule {
    id: "privacy_violation",
    keywords: PRIVACY_KEYWORDS,
    government_clause: "Information Technology Act, 2000 & Personal Data Protection Bill",
    description: "Violation of data privacy and protection rights",
    severity: Severity::Critical,
};
