//! Privacy-need aggregation.
//!
//! Folds the individual metrics into a single 0-100 need score. The
//! baseline sits at 50; exposure metrics push the score up, protective
//! metrics contribute through weakness factors (a strong guarantee adds
//! almost nothing, a missing one adds a lot), and the deployment context
//! scales the final value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PrivacyError, Result};
use crate::score::config::{Localisation, Regulation, ScoringConfig};

/// Canonical metric keys understood by [`aggregate`].
pub mod keys {
    pub const PERSONAL_IDENTIFIERS: &str = "personal_identifiers";
    pub const QUASI_IDENTIFIERS: &str = "quasi_identifiers";
    pub const SENSITIVE_ATTRIBUTES: &str = "sensitive_attributes";
    pub const REIDENTIFICATION_RISK: &str = "reidentification_risk";
    pub const L_DIVERSITY: &str = "l_diversity";
    pub const K_ANONYMITY: &str = "k_anonymity";
    pub const T_CLOSENESS: &str = "t_closeness";
    pub const HIPAA_COMPLIANCE: &str = "hipaa_compliance";
    pub const GDPR_COMPLIANCE: &str = "gdpr_compliance";
}

const BASE_SCORE: f64 = 50.0;

const W_PERSONAL: f64 = 7.0;
const W_QUASI: f64 = 5.0;
const W_SENSITIVE: f64 = 6.0;
const W_REIDENTIFICATION: f64 = 8.0;
const W_L_DIVERSITY: f64 = -3.0;
const W_K_ANONYMITY: f64 = -3.0;
const W_T_CLOSENESS: f64 = -3.0;

/// Named bag of metric values keyed by the [`keys`] constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricBag(BTreeMap<String, f64>);

impl MetricBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a metric value.
    pub fn set(&mut self, key: &str, value: f64) -> &mut Self {
        self.0.insert(key.to_string(), value);
        self
    }

    /// Look up a metric value.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag holds no metrics.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Qualitative bucket for a need score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedLevel {
    Minimal,
    Moderate,
    Elevated,
    Critical,
}

impl NeedLevel {
    /// Bucket a 0-100 need score.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::Critical
        } else if score >= 50.0 {
            Self::Elevated
        } else if score >= 25.0 {
            Self::Moderate
        } else {
            Self::Minimal
        }
    }

    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Elevated => "elevated",
            Self::Critical => "critical",
        }
    }
}

/// Aggregated privacy-need score with its per-metric breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyScore {
    /// Final need score, clipped to [0, 100].
    pub value: f64,
    /// Qualitative bucket for `value`.
    pub need_level: NeedLevel,
    /// Additive contribution of each recognized metric, before the
    /// deployment factors are applied.
    pub contributions: BTreeMap<String, f64>,
    /// Multiplier applied for the data distribution model.
    pub distribution_factor: f64,
    /// Multiplier applied for the encryption scheme.
    pub encryption_factor: f64,
}

/// Weakness factor for a k-anonymity level. Small k means weak
/// protection and a large factor.
pub fn k_anonymity_factor(k: f64) -> f64 {
    if k.is_nan() {
        return 0.0;
    }
    if k <= 1.0 {
        10.0
    } else if k <= 5.0 {
        8.0
    } else if k <= 10.0 {
        5.0
    } else if k <= 20.0 {
        2.0
    } else {
        0.5
    }
}

/// Weakness factor for an l-diversity level.
pub fn l_diversity_factor(l: f64) -> f64 {
    if !l.is_finite() {
        return 0.0;
    }
    if l <= 1.0 {
        10.0
    } else if l <= 2.0 {
        7.0
    } else if l <= 4.0 {
        4.0
    } else if l <= 6.0 {
        2.0
    } else {
        0.5
    }
}

/// Weakness factor for a t-closeness distance. Large t means the class
/// distributions drift far from the overall one.
pub fn t_closeness_factor(t: f64) -> f64 {
    if t >= 0.5 {
        10.0
    } else if t >= 0.3 {
        7.0
    } else if t >= 0.2 {
        4.0
    } else if t >= 0.1 {
        2.0
    } else {
        0.5
    }
}

/// Weakness factor for a 0-100 compliance score: 100 contributes
/// nothing, 0 contributes the full factor of 10.
pub fn compliance_factor(score: f64) -> f64 {
    (100.0 - score) / 10.0
}

fn gdpr_weight(config: &ScoringConfig) -> f64 {
    let mut weight = if config.regulation == Regulation::Gdpr {
        -4.0
    } else {
        -2.0
    };
    if config.localisation == Localisation::Eu {
        weight *= 1.5;
    }
    weight
}

fn hipaa_weight(config: &ScoringConfig) -> f64 {
    let mut weight = if config.regulation == Regulation::Hipaa {
        -4.0
    } else {
        -2.0
    };
    if config.localisation == Localisation::Us {
        weight *= 1.5;
    }
    weight
}

/// Aggregate a bag of metrics into a privacy-need score.
///
/// Unrecognized keys are skipped. Compliance scores must lie in
/// [0, 100]; anything else is an error.
pub fn aggregate(metrics: &MetricBag, config: &ScoringConfig) -> Result<PrivacyScore> {
    for key in [keys::GDPR_COMPLIANCE, keys::HIPAA_COMPLIANCE] {
        if let Some(value) = metrics.get(key) {
            if !(0.0..=100.0).contains(&value) {
                return Err(PrivacyError::InvalidParameter(format!(
                    "{} must be in [0, 100], got {}",
                    key, value
                )));
            }
        }
    }

    let mut score = BASE_SCORE;
    let mut contributions = BTreeMap::new();

    for (key, value) in metrics.iter() {
        let delta = match key {
            keys::PERSONAL_IDENTIFIERS => value * W_PERSONAL,
            keys::QUASI_IDENTIFIERS => value * W_QUASI,
            keys::SENSITIVE_ATTRIBUTES => value * W_SENSITIVE,
            keys::REIDENTIFICATION_RISK => (value * 10.0) * W_REIDENTIFICATION,
            keys::K_ANONYMITY => k_anonymity_factor(value) * (-W_K_ANONYMITY),
            keys::L_DIVERSITY => l_diversity_factor(value) * (-W_L_DIVERSITY),
            keys::T_CLOSENESS => t_closeness_factor(value) * (-W_T_CLOSENESS),
            keys::GDPR_COMPLIANCE => compliance_factor(value) * (-gdpr_weight(config)),
            keys::HIPAA_COMPLIANCE => compliance_factor(value) * (-hipaa_weight(config)),
            _ => {
                log::debug!("ignoring unrecognized metric '{}'", key);
                continue;
            }
        };
        score += delta;
        contributions.insert(key.to_string(), delta);
    }

    let distribution_factor = config.distribution.factor();
    let encryption_factor = config.encryption.factor();
    score *= distribution_factor;
    score *= encryption_factor;
    let value = score.clamp(0.0, 100.0);

    Ok(PrivacyScore {
        value,
        need_level: NeedLevel::from_score(value),
        contributions,
        distribution_factor,
        encryption_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::config::{DataDistribution, EncryptionScheme};
    use approx::assert_relative_eq;

    fn neutral_config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_k_anonymity_factor_breakpoints() {
        assert_relative_eq!(k_anonymity_factor(1.0), 10.0);
        assert_relative_eq!(k_anonymity_factor(5.0), 8.0);
        assert_relative_eq!(k_anonymity_factor(6.0), 5.0);
        assert_relative_eq!(k_anonymity_factor(20.0), 2.0);
        assert_relative_eq!(k_anonymity_factor(21.0), 0.5);
        assert_relative_eq!(k_anonymity_factor(f64::NAN), 0.0);
    }

    #[test]
    fn test_l_diversity_factor_breakpoints() {
        assert_relative_eq!(l_diversity_factor(1.0), 10.0);
        assert_relative_eq!(l_diversity_factor(2.0), 7.0);
        assert_relative_eq!(l_diversity_factor(3.5), 4.0);
        assert_relative_eq!(l_diversity_factor(6.0), 2.0);
        assert_relative_eq!(l_diversity_factor(7.0), 0.5);
        assert_relative_eq!(l_diversity_factor(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_t_closeness_factor_breakpoints() {
        assert_relative_eq!(t_closeness_factor(0.5), 10.0);
        assert_relative_eq!(t_closeness_factor(0.3), 7.0);
        assert_relative_eq!(t_closeness_factor(0.2), 4.0);
        assert_relative_eq!(t_closeness_factor(0.1), 2.0);
        assert_relative_eq!(t_closeness_factor(0.05), 0.5);
    }

    #[test]
    fn test_empty_bag_scores_baseline() {
        let score = aggregate(&MetricBag::new(), &neutral_config()).unwrap();
        assert_relative_eq!(score.value, 50.0);
        assert_eq!(score.need_level, NeedLevel::Elevated);
        assert!(score.contributions.is_empty());
    }

    #[test]
    fn test_count_metrics_add_weighted() {
        let mut bag = MetricBag::new();
        bag.set(keys::PERSONAL_IDENTIFIERS, 1.0)
            .set(keys::QUASI_IDENTIFIERS, 1.0)
            .set(keys::SENSITIVE_ATTRIBUTES, 1.0);
        let score = aggregate(&bag, &neutral_config()).unwrap();
        // 50 + 7 + 5 + 6
        assert_relative_eq!(score.value, 68.0);
        assert_relative_eq!(score.contributions[keys::PERSONAL_IDENTIFIERS], 7.0);
    }

    #[test]
    fn test_reidentification_risk_scales_by_ten() {
        let mut bag = MetricBag::new();
        bag.set(keys::REIDENTIFICATION_RISK, 0.5);
        let score = aggregate(&bag, &neutral_config()).unwrap();
        // 50 + (0.5 * 10) * 8 = 90
        assert_relative_eq!(score.value, 90.0);
        assert_eq!(score.need_level, NeedLevel::Critical);
    }

    #[test]
    fn test_protective_metrics_contribute_weakness() {
        let mut bag = MetricBag::new();
        bag.set(keys::K_ANONYMITY, 1.0);
        let weak = aggregate(&bag, &neutral_config()).unwrap();
        // 50 + 10 * 3 = 80
        assert_relative_eq!(weak.value, 80.0);

        bag.set(keys::K_ANONYMITY, 50.0);
        let strong = aggregate(&bag, &neutral_config()).unwrap();
        // 50 + 0.5 * 3 = 51.5
        assert_relative_eq!(strong.value, 51.5);
    }

    #[test]
    fn test_nan_k_anonymity_contributes_nothing() {
        let mut bag = MetricBag::new();
        bag.set(keys::K_ANONYMITY, f64::NAN);
        let score = aggregate(&bag, &neutral_config()).unwrap();
        assert_relative_eq!(score.value, 50.0);
    }

    #[test]
    fn test_matching_regulation_amplifies_compliance() {
        let mut bag = MetricBag::new();
        bag.set(keys::GDPR_COMPLIANCE, 90.0)
            .set(keys::HIPAA_COMPLIANCE, 50.0);

        let eu = ScoringConfig {
            regulation: Regulation::Gdpr,
            localisation: Localisation::Eu,
            ..Default::default()
        };
        // gdpr weight -4 * 1.5 -> factor 1 * 6 = 6; hipaa factor 5 * 2 = 10
        let eu_score = aggregate(&bag, &eu).unwrap();
        assert_relative_eq!(eu_score.value, 66.0);

        let us = ScoringConfig {
            regulation: Regulation::Hipaa,
            localisation: Localisation::Us,
            ..Default::default()
        };
        // hipaa weight -4 * 1.5 -> factor 5 * 6 = 30; gdpr factor 1 * 2 = 2
        let us_score = aggregate(&bag, &us).unwrap();
        assert_relative_eq!(us_score.value, 82.0);
    }

    #[test]
    fn test_deployment_factors_scale_total() {
        let mut bag = MetricBag::new();
        bag.set(keys::PERSONAL_IDENTIFIERS, 1.0);
        let config = ScoringConfig {
            distribution: DataDistribution::Centralized,
            encryption: EncryptionScheme::Homomorphic,
            ..Default::default()
        };
        let score = aggregate(&bag, &config).unwrap();
        // (50 + 7) * 1.2 * 0.3 = 20.52
        assert_relative_eq!(score.value, 20.52, epsilon = 1e-9);
        assert_relative_eq!(score.distribution_factor, 1.2);
        assert_relative_eq!(score.encryption_factor, 0.3);
        assert_eq!(score.need_level, NeedLevel::Minimal);
    }

    #[test]
    fn test_score_clips_to_hundred() {
        let mut bag = MetricBag::new();
        bag.set(keys::PERSONAL_IDENTIFIERS, 5.0)
            .set(keys::REIDENTIFICATION_RISK, 1.0);
        let config = ScoringConfig {
            encryption: EncryptionScheme::None,
            ..Default::default()
        };
        let score = aggregate(&bag, &config).unwrap();
        assert_relative_eq!(score.value, 100.0);
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let mut bag = MetricBag::new();
        bag.set("coffee_consumption", 99.0);
        let score = aggregate(&bag, &neutral_config()).unwrap();
        assert_relative_eq!(score.value, 50.0);
        assert!(score.contributions.is_empty());
    }

    #[test]
    fn test_compliance_out_of_range_rejected() {
        let mut bag = MetricBag::new();
        bag.set(keys::GDPR_COMPLIANCE, 105.0);
        let err = aggregate(&bag, &neutral_config()).unwrap_err();
        assert!(err.to_string().contains("gdpr_compliance"));
    }

    #[test]
    fn test_need_level_buckets() {
        assert_eq!(NeedLevel::from_score(10.0), NeedLevel::Minimal);
        assert_eq!(NeedLevel::from_score(25.0), NeedLevel::Moderate);
        assert_eq!(NeedLevel::from_score(50.0), NeedLevel::Elevated);
        assert_eq!(NeedLevel::from_score(75.0), NeedLevel::Critical);
        assert_eq!(NeedLevel::Critical.name(), "critical");
    }
}
