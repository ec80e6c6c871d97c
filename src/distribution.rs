//! Discrete probability distributions over categorical value counts.
//!
//! The anonymity and information metrics all reduce columns to value
//! frequencies; this module holds the shared probability math.

use crate::error::{PrivacyError, Result};

/// Tolerance when checking that probabilities sum to one.
const SUM_TOLERANCE: f64 = 1e-6;

/// A discrete probability distribution.
#[derive(Debug, Clone)]
pub struct Distribution {
    probs: Vec<f64>,
}

impl Distribution {
    /// Build a distribution from raw counts.
    ///
    /// Errors if the counts are empty or sum to zero.
    pub fn from_counts(counts: &[usize]) -> Result<Self> {
        let total: usize = counts.iter().sum();
        if counts.is_empty() || total == 0 {
            return Err(PrivacyError::Numerical(
                "cannot build a distribution from empty counts".to_string(),
            ));
        }
        let n = total as f64;
        Ok(Self {
            probs: counts.iter().map(|&c| c as f64 / n).collect(),
        })
    }

    /// Probability of each support point, in count order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    /// Number of support points.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Check if the support is empty.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Largest single probability.
    pub fn max_probability(&self) -> f64 {
        self.probs.iter().cloned().fold(0.0, f64::max)
    }

    /// Shannon entropy in bits.
    pub fn entropy_bits(&self) -> f64 {
        shannon_entropy_bits(&self.probs)
    }
}

/// Shannon entropy in bits of a probability vector.
///
/// Zero-probability entries contribute nothing (0 log 0 = 0).
pub fn shannon_entropy_bits(probs: &[f64]) -> f64 {
    probs
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Jensen-Shannon distance between two probability vectors on the same
/// aligned support, using base-2 logarithms so the result is in [0, 1].
///
/// Both vectors must have the same length and each must sum to one.
pub fn jensen_shannon_distance(p: &[f64], q: &[f64]) -> Result<f64> {
    if p.is_empty() || p.len() != q.len() {
        return Err(PrivacyError::Numerical(format!(
            "mismatched distribution supports: {} vs {}",
            p.len(),
            q.len()
        )));
    }
    for (name, probs) in [("first", p), ("second", q)] {
        let sum: f64 = probs.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(PrivacyError::Numerical(format!(
                "{} distribution sums to {:.6}, expected 1",
                name, sum
            )));
        }
    }

    let mut divergence = 0.0;
    for (&pi, &qi) in p.iter().zip(q) {
        let mi = 0.5 * (pi + qi);
        if pi > 0.0 {
            divergence += 0.5 * pi * (pi / mi).log2();
        }
        if qi > 0.0 {
            divergence += 0.5 * qi * (qi / mi).log2();
        }
    }

    // Floating-point rounding can leave a tiny negative residue.
    Ok(divergence.max(0.0).sqrt())
}
