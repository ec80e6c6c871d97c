//! Privacy-Need Scoring Library
//!
//! This library measures how much privacy protection a tabular dataset
//! needs before it can be shared, and folds the measurements into a
//! single 0-100 score.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (Table, EquivalenceClasses, AssessmentReport)
//! - **classify**: Value-based column classification and quasi-identifier subset search
//! - **detect**: Column-name classification (Gemini-backed and keyword fallback)
//! - **anonymity**: Equivalence-class metrics (k-anonymity, l-diversity, t-closeness, adversary models)
//! - **information**: Information-theoretic leakage (mutual information, conditional entropy, uncertainty)
//! - **distribution**: Discrete distributions, entropy, Jensen-Shannon distance
//! - **dp**: Differential-privacy indistinguishability predicates
//! - **compliance**: GDPR and HIPAA checklist scoring
//! - **score**: Privacy-need aggregation and scoring context
//! - **assess**: End-to-end assessment over a table
//!
//! # Example
//!
//! ```no_run
//! use privscore::prelude::*;
//!
//! // Load data
//! let table = Table::from_csv_path("patients.csv").unwrap();
//!
//! // Run the metric suite and score the result
//! let report = assess(&table, &AssessOptions::default()).unwrap();
//! let bag = metric_bag(&report, None);
//! let score = aggregate(&bag, &ScoringConfig::default()).unwrap();
//! println!("privacy need: {:.1} ({})", score.value, score.need_level.name());
//! ```

pub mod anonymity;
pub mod assess;
pub mod classify;
pub mod compliance;
pub mod data;
pub mod detect;
pub mod distribution;
pub mod dp;
pub mod error;
pub mod information;
pub mod score;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::anonymity::{
        adversary_success_rate, alpha_k_anonymity, delta_presence, k_anonymity,
        l_diversity_distinct, l_diversity_entropy, reidentification_risk, t_closeness,
        AdversaryProfile, AlphaK, DeltaPresence,
    };
    pub use crate::assess::{
        assess, classify_names_or_fallback, metric_bag, AssessOptions, INSUFFICIENT_MESSAGE,
    };
    pub use crate::classify::{
        classify_columns, optimal_qid_subset, risk_score, Classification, ColumnRisk,
        ColumnRole, RiskBands, SubsetSearch, SubsetSearchConfig,
    };
    pub use crate::compliance::{
        gdpr_score, hipaa_score, interpret_score, GDPR_PRINCIPLES, HIPAA_SAFEGUARDS,
    };
    pub use crate::data::{
        AnonymityBlock, AssessmentReport, ColumnKind, EquivalenceClasses, InformationBlock,
        ReportMeta, Table, Value,
    };
    pub use crate::detect::{
        parse_classification, GeminiClassifier, KeywordClassifier, NameClassification,
        NameClassifier,
    };
    pub use crate::distribution::{jensen_shannon_distance, shannon_entropy_bits, Distribution};
    pub use crate::dp::DpBudget;
    pub use crate::error::{PrivacyError, Result};
    pub use crate::information::{
        conditional_entropy_score, mutual_information, uncertainty_profile,
        uncertainty_summary, UncertaintyProfile, UncertaintySummary,
    };
    pub use crate::score::{
        aggregate, keys, DataDistribution, EncryptionScheme, Localisation, MetricBag,
        NeedLevel, PrivacyScore, Regulation, ScoringConfig,
    };
}
