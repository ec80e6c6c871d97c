//! Class-weighted conditional entropy of sensitive attributes.

use crate::data::{EquivalenceClasses, Table, Value};
use crate::error::Result;
use std::collections::HashMap;

/// Smoothing added inside the logarithm so zero probabilities cannot
/// produce singularities.
const SMOOTHING_EPSILON: f64 = 1e-10;

fn smoothed_entropy_bits(probs: &[f64]) -> f64 {
    probs
        .iter()
        .map(|&p| -p * (p + SMOOTHING_EPSILON).log2())
        .sum()
}

/// Mean over sensitive columns of the class-size-weighted conditional
/// entropy of the column given the quasi-identifier partition, in bits.
///
/// High values mean the quasi-identifiers reveal little about the
/// sensitive values. Returns 0 when either list is empty; callers treat
/// that as an insufficiency condition, not an error.
pub fn conditional_entropy_score(
    table: &Table,
    qids: &[String],
    sas: &[String],
) -> Result<f64> {
    if qids.is_empty() || sas.is_empty() {
        return Ok(0.0);
    }

    let classes = EquivalenceClasses::from_table(table, qids)?;
    let n = table.n_rows() as f64;

    let mut total = 0.0;
    for sa in sas {
        let values = table.column(sa)?;
        let mut weighted = 0.0;
        for class in classes.iter() {
            let mut counts: HashMap<&Value, usize> = HashMap::new();
            for &row in class {
                *counts.entry(&values[row]).or_insert(0) += 1;
            }
            let class_len = class.len() as f64;
            let probs: Vec<f64> = counts.values().map(|&c| c as f64 / class_len).collect();
            weighted += (class_len / n) * smoothed_entropy_bits(&probs);
        }
        total += weighted;
    }
    Ok(total / sas.len() as f64)
}
