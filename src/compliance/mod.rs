//! Regulatory compliance scoring.
//!
//! Each framework defines a weighted list of principles; callers supply
//! a 0-100 self-assessment per principle and get back the weighted
//! overall score. Every principle must be present and in range.

mod gdpr;
mod hipaa;

pub use gdpr::{gdpr_score, GDPR_PRINCIPLES};
pub use hipaa::{hipaa_score, HIPAA_SAFEGUARDS};

use std::collections::BTreeMap;

use crate::error::{PrivacyError, Result};

/// Weighted sum over a framework's principles.
pub(crate) fn weighted_score(
    principles: &[(&str, f64)],
    scores: &BTreeMap<String, f64>,
) -> Result<f64> {
    let mut total = 0.0;
    for (principle, weight) in principles {
        let value = scores
            .get(*principle)
            .copied()
            .ok_or_else(|| PrivacyError::MissingPrinciple(principle.to_string()))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(PrivacyError::PrincipleOutOfRange {
                principle: principle.to_string(),
                value,
            });
        }
        total += value * weight;
    }
    Ok(total)
}

/// Human-readable reading of a 0-100 compliance score.
pub fn interpret_score(score: f64) -> &'static str {
    if score >= 90.0 {
        "Highly compliant"
    } else if score >= 70.0 {
        "Mostly compliant but needs improvement"
    } else {
        "Significant gaps in compliance"
    }
}
