//! Assessment report assembly and serialization.

use serde::{Deserialize, Serialize};

use crate::anonymity::{AdversaryProfile, AlphaK, DeltaPresence};
use crate::classify::Classification;
use crate::error::Result;
use crate::information::UncertaintySummary;
use crate::score::PrivacyScore;

/// Complete privacy assessment for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Generation metadata.
    pub meta: ReportMeta,
    /// Value-based column classification.
    pub classification: Classification,
    /// Set when the classification left too few columns for the full
    /// metric suite; the metric blocks are absent in that case.
    pub insufficient: Option<String>,
    /// Equivalence-class anonymity metrics.
    pub anonymity: Option<AnonymityBlock>,
    /// Information-theoretic leakage metrics.
    pub information: Option<InformationBlock>,
    /// Membership disclosure against a reference dataset, when one was
    /// supplied.
    pub delta_presence: Option<DeltaPresence>,
    /// Aggregated privacy-need score, when a scoring context was
    /// supplied.
    pub privacy_score: Option<PrivacyScore>,
}

impl AssessmentReport {
    /// Render as YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Report generation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Generation timestamp.
    pub generated: String,
    /// Tool version.
    pub version: String,
    /// Tool name.
    pub tool: String,
    /// Number of data rows assessed.
    pub rows: usize,
    /// Number of columns assessed.
    pub columns: usize,
}

impl ReportMeta {
    /// Metadata stamped with the current time and crate version.
    pub fn now(rows: usize, columns: usize) -> Self {
        Self {
            generated: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            tool: "privscore".to_string(),
            rows,
            columns,
        }
    }
}

/// Equivalence-class anonymity metrics over the quasi-identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymityBlock {
    /// Quasi-identifier columns the metrics were computed over (the
    /// refined set when the subset search adopted one).
    pub quasi_identifiers: Vec<String>,
    /// Smallest equivalence-class size.
    pub k_anonymity: usize,
    /// Mean class size paired with the minimum.
    pub alpha_k: AlphaK,
    /// Mean per-class entropy of the primary sensitive attribute, in bits.
    pub l_diversity_entropy: f64,
    /// Smallest per-class count of distinct sensitive values.
    pub l_diversity_distinct: usize,
    /// Largest per-class Jensen-Shannon distance of the sensitive
    /// attribute from its overall distribution.
    pub t_closeness: f64,
    /// Expected fraction of rows an attacker re-identifies.
    pub reidentification_risk: f64,
    /// Per-class attacker success-rate profile.
    pub adversary: AdversaryProfile,
    /// Sensitive attribute the diversity and closeness metrics used.
    pub primary_sensitive: String,
}

/// Information-theoretic leakage metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformationBlock {
    /// Mean mutual information between quasi-identifier and sensitive
    /// columns, in nats.
    pub mutual_information: f64,
    /// Mean smoothed conditional entropy of the sensitive attributes
    /// given the quasi-identifier classes, in bits.
    pub conditional_entropy_score: f64,
    /// Entropy summary across the sensitive columns.
    pub uncertainty: UncertaintySummary,
}
