//! GDPR compliance checklist.

use std::collections::BTreeMap;

use crate::compliance::weighted_score;
use crate::error::Result;

/// GDPR principles and their weights (weights sum to 1.0).
pub const GDPR_PRINCIPLES: &[(&str, f64)] = &[
    ("Lawfulness, Fairness, and Transparency", 0.20),
    ("Purpose Limitation", 0.15),
    ("Data Minimization", 0.15),
    ("Accuracy", 0.10),
    ("Storage Limitation", 0.10),
    ("Integrity and Confidentiality", 0.20),
    ("Accountability", 0.10),
];

/// Weighted GDPR compliance score from per-principle 0-100 assessments.
///
/// Every principle in [`GDPR_PRINCIPLES`] must be present; extra keys
/// are ignored.
pub fn gdpr_score(scores: &BTreeMap<String, f64>) -> Result<f64> {
    weighted_score(GDPR_PRINCIPLES, scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn full_marks() -> BTreeMap<String, f64> {
        GDPR_PRINCIPLES
            .iter()
            .map(|(name, _)| (name.to_string(), 100.0))
            .collect()
    }

    #[test]
    fn test_full_marks_scores_hundred() {
        assert_relative_eq!(gdpr_score(&full_marks()).unwrap(), 100.0);
    }

    #[test]
    fn test_weighted_mix() {
        let mut scores = full_marks();
        scores.insert("Lawfulness, Fairness, and Transparency".to_string(), 80.0);
        scores.insert("Purpose Limitation".to_string(), 90.0);
        scores.insert("Data Minimization".to_string(), 70.0);
        scores.insert("Accuracy".to_string(), 100.0);
        scores.insert("Storage Limitation".to_string(), 60.0);
        scores.insert("Integrity and Confidentiality".to_string(), 85.0);
        scores.insert("Accountability".to_string(), 95.0);
        assert_relative_eq!(gdpr_score(&scores).unwrap(), 82.5, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_principle_is_named() {
        let mut scores = full_marks();
        scores.remove("Accuracy");
        let err = gdpr_score(&scores).unwrap_err();
        assert!(err.to_string().contains("Accuracy"));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut scores = full_marks();
        scores.insert("Accuracy".to_string(), 105.0);
        assert!(gdpr_score(&scores).is_err());
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut scores = full_marks();
        scores.insert("Right to be Forgotten".to_string(), 0.0);
        assert_relative_eq!(gdpr_score(&scores).unwrap(), 100.0);
    }
}
