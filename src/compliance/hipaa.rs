//! HIPAA compliance checklist.

use std::collections::BTreeMap;

use crate::compliance::weighted_score;
use crate::error::Result;

/// HIPAA safeguards and their weights (weights sum to 1.0).
pub const HIPAA_SAFEGUARDS: &[(&str, f64)] = &[
    ("Data Encryption", 0.20),
    ("Access Controls", 0.20),
    ("Audit Logs", 0.15),
    ("Training", 0.10),
    ("Risk Assessments", 0.15),
    ("Incident Response", 0.20),
];

/// Weighted HIPAA compliance score from per-safeguard 0-100 assessments.
///
/// Every safeguard in [`HIPAA_SAFEGUARDS`] must be present; extra keys
/// are ignored.
pub fn hipaa_score(scores: &BTreeMap<String, f64>) -> Result<f64> {
    weighted_score(HIPAA_SAFEGUARDS, scores)
}
