//! t-closeness: how far each equivalence class's sensitive distribution
//! drifts from the table-wide distribution.

use crate::data::{EquivalenceClasses, Table, Value};
use crate::distribution::jensen_shannon_distance;
use crate::error::Result;
use rayon::prelude::*;
use std::collections::HashMap;

/// Largest Jensen-Shannon distance between a class's sensitive-value
/// distribution and the overall distribution, in [0, 1].
///
/// Class distributions are reindexed onto the full support before
/// comparison, so values absent from a class carry probability 0.
/// Per-class distances are computed in parallel; a failure in any class
/// fails the whole metric.
pub fn t_closeness(table: &Table, qids: &[String], sensitive: &str) -> Result<f64> {
    let classes = EquivalenceClasses::from_table(table, qids)?;
    let values = table.column(sensitive)?;

    // Union support in first-occurrence order.
    let mut support: HashMap<&Value, usize> = HashMap::new();
    let mut overall_counts: Vec<usize> = Vec::new();
    for value in values {
        match support.get(value) {
            Some(&idx) => overall_counts[idx] += 1,
            None => {
                support.insert(value, overall_counts.len());
                overall_counts.push(1);
            }
        }
    }
    let n = values.len() as f64;
    let overall: Vec<f64> = overall_counts.iter().map(|&c| c as f64 / n).collect();

    let class_rows: Vec<&[usize]> = classes.iter().collect();
    let distances: Result<Vec<f64>> = class_rows
        .par_iter()
        .map(|class| {
            let mut probs = vec![0.0; overall.len()];
            let share = 1.0 / class.len() as f64;
            for &row in class.iter() {
                probs[support[&values[row]]] += share;
            }
            jensen_shannon_distance(&probs, &overall)
        })
        .collect();

    Ok(distances?.into_iter().fold(0.0, f64::max))
}
