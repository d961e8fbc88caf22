//! Document analysis: model call, rule cross-check, merge, persist

use std::collections::HashMap;

use compliance_engine::ComplianceEngine;
use legal_ai::{AnalysisSource, LegalAi};
use shared_types::{Analysis, Document, DocumentStatus, Violation};
use tracing::{error, info};

use super::PipelineError;
use crate::store::DocumentStore;

pub struct AnalysisPipeline<'a> {
    ai: &'a LegalAi,
    rules: &'a ComplianceEngine,
    store: &'a DocumentStore,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(ai: &'a LegalAi, rules: &'a ComplianceEngine, store: &'a DocumentStore) -> Self {
        Self { ai, rules, store }
    }

    /// Analyse `document` and persist the result.
    ///
    /// On success the analysis replaces any previous one and the status
    /// becomes `completed`. If the model call fails the status becomes
    /// `failed`, the previous analysis is left in place and the error is
    /// returned.
    pub async fn run(&self, document: &mut Document) -> Result<Analysis, PipelineError> {
        let outcome = match self.ai.analyze(&document.original_text, &document.title).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.mark_failed(document).await;
                return Err(e.into());
            }
        };

        let rule_violations = self.rules.scan(&document.original_text);
        let rule_count = rule_violations.len();
        let ai_count = outcome.analysis.violations.len();

        let analysis = Analysis {
            violations: merge_violations(rule_violations, outcome.analysis.violations),
            ..outcome.analysis
        };

        info!(
            "Analysed document {}: {} rule + {} model violations -> {} merged, risk {}{}",
            document.id,
            rule_count,
            ai_count,
            analysis.violations.len(),
            analysis.risk_level,
            if outcome.source == AnalysisSource::Fallback {
                " (fallback)"
            } else {
                ""
            }
        );

        document.analysis = Some(analysis.clone());
        document.status = DocumentStatus::Completed;
        document.touch();
        self.store.save(document).await?;

        Ok(analysis)
    }

    async fn mark_failed(&self, document: &mut Document) {
        document.status = DocumentStatus::Failed;
        document.touch();
        if let Err(e) = self.store.save(document).await {
            error!("Could not mark document {} failed: {}", document.id, e);
        }
    }
}

/// Concatenate rule then model violations, one entry per `clause`.
///
/// A later entry with an already seen clause overwrites the earlier one in
/// place: a model violation quoting a rule keyword verbatim replaces the
/// rule violation for that keyword.
pub fn merge_violations(rule: Vec<Violation>, ai: Vec<Violation>) -> Vec<Violation> {
    let mut merged: Vec<Violation> = Vec::with_capacity(rule.len() + ai.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    for violation in rule.into_iter().chain(ai) {
        match slots.get(&violation.clause) {
            Some(&slot) => merged[slot] = violation,
            None => {
                slots.insert(violation.clause.clone(), merged.len());
                merged.push(violation);
            }
        }
    }

    merged
}
