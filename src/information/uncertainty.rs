//! Entropy-based uncertainty measures of sensitive columns.

use crate::data::Table;
use crate::distribution::Distribution;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Entropy measures of a single column's value distribution, in bits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UncertaintyProfile {
    /// Shannon entropy.
    pub entropy: f64,
    /// -log2 of the most likely value's probability.
    pub min_entropy: f64,
    /// log2 of the distinct value count.
    pub max_entropy: f64,
    /// entropy / max_entropy, or 0 for a constant column.
    pub normalized_entropy: f64,
}

/// Uncertainty measures of one column.
pub fn uncertainty_profile(table: &Table, column: &str) -> Result<UncertaintyProfile> {
    let counts: Vec<usize> = table.value_counts(column)?.values().copied().collect();
    let dist = Distribution::from_counts(&counts)?;

    let entropy = dist.entropy_bits();
    let max_entropy = (dist.len() as f64).log2();
    let min_entropy = -dist.max_probability().log2();
    let normalized_entropy = if max_entropy > 0.0 {
        entropy / max_entropy
    } else {
        0.0
    };

    Ok(UncertaintyProfile {
        entropy,
        min_entropy,
        max_entropy,
        normalized_entropy,
    })
}

/// Averages of the per-column uncertainty measures over the sensitive
/// columns. All zero when the list is empty.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UncertaintySummary {
    pub avg_entropy: f64,
    pub avg_min_entropy: f64,
    pub avg_normalized_entropy: f64,
}

/// Average the uncertainty measures over the named columns.
pub fn uncertainty_summary(table: &Table, columns: &[String]) -> Result<UncertaintySummary> {
    if columns.is_empty() {
        return Ok(UncertaintySummary::default());
    }

    let mut summary = UncertaintySummary::default();
    for name in columns {
        let profile = uncertainty_profile(table, name)?;
        summary.avg_entropy += profile.entropy;
        summary.avg_min_entropy += profile.min_entropy;
        summary.avg_normalized_entropy += profile.normalized_entropy;
    }
    let n = columns.len() as f64;
    summary.avg_entropy /= n;
    summary.avg_min_entropy /= n;
    summary.avg_normalized_entropy /= n;
    Ok(summary)
}
