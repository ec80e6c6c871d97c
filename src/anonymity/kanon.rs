//! k-anonymity and the alpha-k class-size summary.

use crate::data::{EquivalenceClasses, Table};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Smallest equivalence-class size under the given quasi-identifiers.
///
/// With an empty quasi-identifier list every row stands alone, so the
/// result degrades to 1.
pub fn k_anonymity(table: &Table, qids: &[String]) -> Result<usize> {
    let classes = EquivalenceClasses::from_table(table, qids)?;
    Ok(classes.min_size())
}

/// Mean and minimum equivalence-class size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlphaK {
    /// Mean class size.
    pub alpha: f64,
    /// Minimum class size.
    pub k: usize,
}

/// Class-size summary under the given quasi-identifiers.
pub fn alpha_k_anonymity(table: &Table, qids: &[String]) -> Result<AlphaK> {
    let classes = EquivalenceClasses::from_table(table, qids)?;
    Ok(AlphaK {
        alpha: classes.mean_size(),
        k: classes.min_size(),
    })
}
