//! Search for a quasi-identifier subset that trades uniqueness for
//! utility.
//!
//! A subset is acceptable when its smallest equivalence class still has
//! `min_k` rows; among acceptable subsets, a candidate replaces the
//! current best only when it strictly improves both privacy gain and
//! utility entropy. When nothing qualifies the original list stands.

use crate::data::EquivalenceClasses;
use crate::data::Table;
use crate::distribution::Distribution;
use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Bounds for the subset search.
///
/// Exhaustive enumeration is exponential in the number of candidate
/// columns, so beyond `exhaustive_limit` the search switches to greedy
/// forward selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubsetSearchConfig {
    /// Smallest equivalence-class size a subset must preserve.
    pub min_k: usize,
    /// Largest candidate count enumerated exhaustively.
    pub exhaustive_limit: usize,
}

impl Default for SubsetSearchConfig {
    fn default() -> Self {
        Self {
            min_k: 3,
            exhaustive_limit: 12,
        }
    }
}

/// Outcome of the subset search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetSearch {
    /// The chosen quasi-identifier columns.
    pub columns: Vec<String>,
    /// Uniqueness reduction relative to the original list.
    pub privacy_gain: f64,
    /// Mean value-distribution entropy (bits) of the chosen columns.
    pub utility_entropy: f64,
    /// Whether a subset other than the original list was adopted.
    pub improved: bool,
}

/// Fraction of rows whose projection onto `columns` is unique.
pub fn uniqueness(table: &Table, columns: &[String]) -> Result<f64> {
    let classes = EquivalenceClasses::from_table(table, columns)?;
    let unique = classes.sizes().filter(|&s| s == 1).count();
    Ok(unique as f64 / table.n_rows() as f64)
}

/// Mean Shannon entropy (bits) of the value distributions of `columns`.
pub fn utility_entropy(table: &Table, columns: &[String]) -> Result<f64> {
    if columns.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for name in columns {
        let counts: Vec<usize> = table.value_counts(name)?.values().copied().collect();
        total += Distribution::from_counts(&counts)?.entropy_bits();
    }
    Ok(total / columns.len() as f64)
}

#[derive(Debug, Clone, Copy)]
struct Evaluation {
    gain: f64,
    entropy: f64,
}

/// Find a quasi-identifier subset that keeps every class at `min_k`
/// rows while improving both privacy gain and utility entropy.
///
/// Candidates are visited by increasing subset size, then by column
/// order. With fewer than two candidates there is nothing to search and
/// the list is returned unchanged.
pub fn optimal_qid_subset(
    table: &Table,
    qids: &[String],
    config: &SubsetSearchConfig,
) -> Result<SubsetSearch> {
    if qids.len() < 2 {
        return Ok(SubsetSearch {
            columns: qids.to_vec(),
            privacy_gain: 0.0,
            utility_entropy: utility_entropy(table, qids)?,
            improved: false,
        });
    }

    let base_uniqueness = uniqueness(table, qids)?;

    let best = if qids.len() <= config.exhaustive_limit {
        exhaustive_search(table, qids, base_uniqueness, config)?
    } else {
        debug!(
            "{} candidate columns exceed the exhaustive limit of {}; using greedy selection",
            qids.len(),
            config.exhaustive_limit
        );
        greedy_search(table, qids, base_uniqueness, config)?
    };

    match best {
        Some((columns, eval)) => {
            let improved = columns != qids;
            debug!(
                "adopted quasi-identifier subset {:?} (gain {:.3}, entropy {:.3})",
                columns, eval.gain, eval.entropy
            );
            Ok(SubsetSearch {
                columns,
                privacy_gain: eval.gain,
                utility_entropy: eval.entropy,
                improved,
            })
        }
        None => {
            debug!("no subset met the k = {} floor; keeping the original list", config.min_k);
            Ok(SubsetSearch {
                columns: qids.to_vec(),
                privacy_gain: 0.0,
                utility_entropy: utility_entropy(table, qids)?,
                improved: false,
            })
        }
    }
}

fn evaluate_subset(
    table: &Table,
    subset: &[String],
    base_uniqueness: f64,
    min_k: usize,
) -> Result<Option<Evaluation>> {
    let classes = EquivalenceClasses::from_table(table, subset)?;
    if classes.min_size() < min_k {
        return Ok(None);
    }
    let unique = classes.sizes().filter(|&s| s == 1).count();
    Ok(Some(Evaluation {
        gain: base_uniqueness - unique as f64 / table.n_rows() as f64,
        entropy: utility_entropy(table, subset)?,
    }))
}

fn improves(eval: &Evaluation, best: &Option<(Vec<String>, Evaluation)>) -> bool {
    match best {
        Some((_, b)) => eval.gain > b.gain && eval.entropy > b.entropy,
        None => true,
    }
}

fn exhaustive_search(
    table: &Table,
    qids: &[String],
    base_uniqueness: f64,
    config: &SubsetSearchConfig,
) -> Result<Option<(Vec<String>, Evaluation)>> {
    let mut best: Option<(Vec<String>, Evaluation)> = None;

    for size in 1..=qids.len() {
        for combo in index_combinations(qids.len(), size) {
            let subset: Vec<String> = combo.iter().map(|&i| qids[i].clone()).collect();
            if let Some(eval) = evaluate_subset(table, &subset, base_uniqueness, config.min_k)? {
                if improves(&eval, &best) {
                    best = Some((subset, eval));
                }
            }
        }
    }

    Ok(best)
}

/// Greedy forward selection: seed with the best acceptable single
/// column, then grow while an extension improves both criteria. Needs
/// an acceptable single-column seed; without one it reports no result
/// and the caller falls back to the original list.
fn greedy_search(
    table: &Table,
    qids: &[String],
    base_uniqueness: f64,
    config: &SubsetSearchConfig,
) -> Result<Option<(Vec<String>, Evaluation)>> {
    let mut best: Option<(Vec<String>, Evaluation)> = None;

    for name in qids {
        let subset = vec![name.clone()];
        if let Some(eval) = evaluate_subset(table, &subset, base_uniqueness, config.min_k)? {
            if improves(&eval, &best) {
                best = Some((subset, eval));
            }
        }
    }

    while let Some((current, _)) = best.clone() {
        let mut extended = false;
        for name in qids {
            if current.contains(name) {
                continue;
            }
            let mut subset = current.clone();
            subset.push(name.clone());
            if let Some(eval) = evaluate_subset(table, &subset, base_uniqueness, config.min_k)? {
                if improves(&eval, &best) {
                    best = Some((subset, eval));
                    extended = true;
                    break;
                }
            }
        }
        if !extended {
            break;
        }
    }

    Ok(best)
}

/// Lexicographic k-combinations of 0..n.
fn index_combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    if k == 0 || k > n {
        return result;
    }
    let mut combo: Vec<usize> = (0..k).collect();
    loop {
        result.push(combo.clone());
        let mut i = k;
        while i > 0 && combo[i - 1] == n - k + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            return result;
        }
        combo[i - 1] += 1;
        for j in i..k {
            combo[j] = combo[j - 1] + 1;
        }
    }
}
