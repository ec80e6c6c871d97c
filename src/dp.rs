//! Differential-privacy indistinguishability predicates.
//!
//! Checks whether a pair of output probabilities, observed on two
//! neighboring datasets, is consistent with a declared privacy budget.

use serde::{Deserialize, Serialize};

use crate::error::{PrivacyError, Result};

/// An (ε, δ) privacy budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpBudget {
    pub epsilon: f64,
    pub delta: f64,
}

impl DpBudget {
    /// Pure ε-DP budget (δ = 0).
    pub fn pure(epsilon: f64) -> Result<Self> {
        Self::new(epsilon, 0.0)
    }

    /// Budget with ε >= 0 and δ in [0, 1].
    pub fn new(epsilon: f64, delta: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(PrivacyError::InvalidParameter(format!(
                "epsilon must be finite and non-negative, got {}",
                epsilon
            )));
        }
        if !delta.is_finite() || !(0.0..=1.0).contains(&delta) {
            return Err(PrivacyError::InvalidParameter(format!(
                "delta must be in [0, 1], got {}",
                delta
            )));
        }
        Ok(Self { epsilon, delta })
    }

    /// Check ε-DP: p(D1) <= e^ε * p(D2).
    pub fn satisfies_pure(&self, p_d1: f64, p_d2: f64) -> Result<bool> {
        validate_probability("p_d1", p_d1)?;
        validate_probability("p_d2", p_d2)?;
        Ok(p_d1 <= self.epsilon.exp() * p_d2)
    }

    /// Check (ε, δ)-DP: p(D1) <= e^ε * p(D2) + δ.
    pub fn satisfies_approximate(&self, p_d1: f64, p_d2: f64) -> Result<bool> {
        validate_probability("p_d1", p_d1)?;
        validate_probability("p_d2", p_d2)?;
        Ok(p_d1 <= self.epsilon.exp() * p_d2 + self.delta)
    }
}

fn validate_probability(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(PrivacyError::InvalidParameter(format!(
            "{} must be a probability in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
