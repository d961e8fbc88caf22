//! Keyword tables and substring matching for the violation rules

/// One-sided termination and liability terms
pub const UNFAIR_TERMS_KEYWORDS: &[&str] = &[
    "unilateral termination",
    "arbitrary changes",
    "no refund",
    "unlimited liability",
    "sole discretion",
    "without notice",
];

/// Penalty and fine amounts out of proportion to loss
pub const PENALTY_KEYWORDS: &[&str] = &[
    "penalty exceeding",
    "disproportionate fine",
    "excessive charges",
    "penalty of",
    "fine of",
];

/// Data collection and sharing without consent
pub const PRIVACY_KEYWORDS: &[&str] = &[
    "data sharing without consent",
    "no privacy policy",
    "unlimited data collection",
    "share personal information",
    "third party data",
];

/// Hidden or deceptive charges
pub const MISLEADING_KEYWORDS: &[&str] = &[
    "hidden charges",
    "misleading information",
    "false representation",
    "additional fees",
    "subject to change",
];

/// Blanket waivers that heavily favour one party
pub const UNCONSCIONABLE_KEYWORDS: &[&str] = &[
    "waive all rights",
    "no liability",
    "accept all risks",
    "indemnify company",
];

/// Keywords from `keywords` that occur in `text_lower`, in table order.
///
/// `text_lower` must already be lower-cased (the tables are). Keywords are
/// matched as plain substrings, once each regardless of how often they occur.
pub fn matched_keywords<'k>(
    text_lower: &'k str,
    keywords: &'k [&'static str],
) -> impl Iterator<Item = &'static str> + 'k {
    keywords
        .iter()
        .copied()
        .filter(move |keyword| text_lower.contains(keyword))
}
