//! End-to-end assessment over a single table.

use serde::{Deserialize, Serialize};

use crate::anonymity::{
    adversary_success_rate, alpha_k_anonymity, k_anonymity, l_diversity_distinct,
    l_diversity_entropy, reidentification_risk, t_closeness,
};
use crate::classify::{classify_columns, optimal_qid_subset, RiskBands, SubsetSearchConfig};
use crate::data::{AnonymityBlock, AssessmentReport, InformationBlock, ReportMeta, Table};
use crate::detect::{KeywordClassifier, NameClassification, NameClassifier};
use crate::error::Result;
use crate::information::{conditional_entropy_score, mutual_information, uncertainty_summary};
use crate::score::{keys, MetricBag};

/// Message recorded when the metric suite cannot run.
pub const INSUFFICIENT_MESSAGE: &str =
    "Insufficient QIDs or SAs for full metric computation.";

/// Knobs for a single assessment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessOptions {
    /// Risk bands used by the value-based classification.
    pub bands: RiskBands,
    /// Whether to search for a smaller quasi-identifier subset before
    /// computing the metrics.
    pub optimize_qids: bool,
    /// Subset-search parameters.
    pub subset: SubsetSearchConfig,
}

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            bands: RiskBands::default(),
            optimize_qids: true,
            subset: SubsetSearchConfig::default(),
        }
    }
}

/// Run the full metric suite over a table.
///
/// Columns are classified from their value distributions, the
/// quasi-identifier set is optionally refined, and the anonymity and
/// information metrics are computed over the result. When the
/// classification yields no quasi-identifiers or no sensitive
/// attributes the report carries [`INSUFFICIENT_MESSAGE`] instead of
/// metric blocks.
pub fn assess(table: &Table, options: &AssessOptions) -> Result<AssessmentReport> {
    let classification = classify_columns(table, &options.bands)?;
    log::info!(
        "classified {} columns: {} quasi, {} sensitive",
        table.n_cols(),
        classification.quasi_identifiers.len(),
        classification.sensitive_attributes.len()
    );

    let mut qids = classification.quasi_identifiers.clone();
    if options.optimize_qids && !qids.is_empty() {
        let search = optimal_qid_subset(table, &qids, &options.subset)?;
        if search.improved {
            log::info!(
                "refined quasi-identifiers {:?} -> {:?} (gain {:.3})",
                qids,
                search.columns,
                search.privacy_gain
            );
        }
        qids = search.columns;
    }
    let sas = classification.sensitive_attributes.clone();

    let meta = ReportMeta::now(table.n_rows(), table.n_cols());

    if qids.is_empty() || sas.is_empty() {
        log::warn!("{}", INSUFFICIENT_MESSAGE);
        return Ok(AssessmentReport {
            meta,
            classification,
            insufficient: Some(INSUFFICIENT_MESSAGE.to_string()),
            anonymity: None,
            information: None,
            delta_presence: None,
            privacy_score: None,
        });
    }

    // Diversity and closeness are measured against the first sensitive
    // attribute; mutual information and conditional entropy span all of
    // them.
    let primary = sas[0].clone();

    let anonymity = AnonymityBlock {
        quasi_identifiers: qids.clone(),
        k_anonymity: k_anonymity(table, &qids)?,
        alpha_k: alpha_k_anonymity(table, &qids)?,
        l_diversity_entropy: l_diversity_entropy(table, &qids, &primary)?,
        l_diversity_distinct: l_diversity_distinct(table, &qids, &primary)?,
        t_closeness: t_closeness(table, &qids, &primary)?,
        reidentification_risk: reidentification_risk(table, &qids)?,
        adversary: adversary_success_rate(table, &qids)?.rounded(),
        primary_sensitive: primary,
    };

    let information = InformationBlock {
        mutual_information: mutual_information(table, &qids, &sas)?,
        conditional_entropy_score: conditional_entropy_score(table, &qids, &sas)?,
        uncertainty: uncertainty_summary(table, &sas)?,
    };

    Ok(AssessmentReport {
        meta,
        classification,
        insufficient: None,
        anonymity: Some(anonymity),
        information: Some(information),
        delta_presence: None,
        privacy_score: None,
    })
}

/// Classify column names, falling back to keyword matching when the
/// primary classifier fails. Classification failures degrade the
/// assessment instead of aborting it.
pub fn classify_names_or_fallback(
    primary: &dyn NameClassifier,
    names: &[String],
) -> NameClassification {
    match primary.classify_names(names) {
        Ok(classification) => classification,
        Err(e) => {
            log::warn!("name classifier failed ({}); falling back to keyword matching", e);
            KeywordClassifier::new()
                .classify_names(names)
                .unwrap_or_default()
        }
    }
}

/// Assemble the metric bag for scoring from an assessment report.
///
/// Category counts come from the name classification when one is
/// available, otherwise from the value-based classification (which has
/// no personal-identifier category). Compliance scores are the
/// caller's to add.
pub fn metric_bag(report: &AssessmentReport, names: Option<&NameClassification>) -> MetricBag {
    let mut bag = MetricBag::new();
    match names {
        Some(n) => {
            let (p, q, s, _) = n.counts();
            bag.set(keys::PERSONAL_IDENTIFIERS, p as f64);
            bag.set(keys::QUASI_IDENTIFIERS, q as f64);
            bag.set(keys::SENSITIVE_ATTRIBUTES, s as f64);
        }
        None => {
            bag.set(
                keys::QUASI_IDENTIFIERS,
                report.classification.quasi_identifiers.len() as f64,
            );
            bag.set(
                keys::SENSITIVE_ATTRIBUTES,
                report.classification.sensitive_attributes.len() as f64,
            );
        }
    }
    if let Some(anonymity) = &report.anonymity {
        bag.set(keys::REIDENTIFICATION_RISK, anonymity.reidentification_risk);
        bag.set(keys::K_ANONYMITY, anonymity.k_anonymity as f64);
        bag.set(keys::L_DIVERSITY, anonymity.l_diversity_entropy);
        bag.set(keys::T_CLOSENESS, anonymity.t_closeness);
    }
    bag
}
