//! l-diversity of a sensitive attribute within equivalence classes.

use crate::data::{EquivalenceClasses, Table, Value};
use crate::distribution::Distribution;
use crate::error::Result;
use std::collections::{HashMap, HashSet};

/// Entropy l-diversity: the mean over equivalence classes of the
/// Shannon entropy (bits) of the sensitive attribute's distribution
/// within the class.
///
/// 0 means every class is constant in the sensitive attribute; a class
/// uniform over m values contributes log2(m).
pub fn l_diversity_entropy(table: &Table, qids: &[String], sensitive: &str) -> Result<f64> {
    let classes = EquivalenceClasses::from_table(table, qids)?;
    let values = table.column(sensitive)?;

    let mut total = 0.0;
    for class in classes.iter() {
        let mut counts: HashMap<&Value, usize> = HashMap::new();
        for &row in class {
            *counts.entry(&values[row]).or_insert(0) += 1;
        }
        let counts: Vec<usize> = counts.values().copied().collect();
        total += Distribution::from_counts(&counts)?.entropy_bits();
    }
    Ok(total / classes.len() as f64)
}

/// Distinct l-diversity: the minimum over equivalence classes of the
/// number of distinct sensitive values in the class.
pub fn l_diversity_distinct(table: &Table, qids: &[String], sensitive: &str) -> Result<usize> {
    let classes = EquivalenceClasses::from_table(table, qids)?;
    let values = table.column(sensitive)?;

    let min = classes
        .iter()
        .map(|class| {
            class
                .iter()
                .map(|&row| &values[row])
                .collect::<HashSet<&Value>>()
                .len()
        })
        .min()
        .unwrap_or(0);
    Ok(min)
}
