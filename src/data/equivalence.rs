//! Equivalence-class partitioning by quasi-identifier tuples.

use crate::data::table::{Table, Value};
use crate::error::Result;
use std::collections::HashMap;

/// Partition of a table's rows into equivalence classes: rows sharing
/// the same tuple of values over the grouping columns fall in the same
/// class.
#[derive(Debug, Clone)]
pub struct EquivalenceClasses {
    classes: Vec<Vec<usize>>,
}

impl EquivalenceClasses {
    /// Group table rows by their projection onto the named columns.
    ///
    /// Classes are ordered by first occurrence, so the partition is
    /// deterministic. With no grouping columns every row forms its own
    /// class, the conservative reading used by the anonymity metrics.
    pub fn from_table(table: &Table, columns: &[String]) -> Result<Self> {
        if columns.is_empty() {
            return Ok(Self {
                classes: (0..table.n_rows()).map(|i| vec![i]).collect(),
            });
        }

        let cols: Vec<&[Value]> = columns
            .iter()
            .map(|name| table.column(name))
            .collect::<Result<_>>()?;

        let mut index: HashMap<Vec<&Value>, usize> = HashMap::new();
        let mut classes: Vec<Vec<usize>> = Vec::new();
        for row in 0..table.n_rows() {
            let key: Vec<&Value> = cols.iter().map(|col| &col[row]).collect();
            let class = match index.get(&key) {
                Some(&idx) => idx,
                None => {
                    classes.push(Vec::new());
                    index.insert(key, classes.len() - 1);
                    classes.len() - 1
                }
            };
            classes[class].push(row);
        }

        Ok(Self { classes })
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the partition is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Row count of each class, in class order.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.classes.iter().map(|c| c.len())
    }

    /// Smallest class size.
    pub fn min_size(&self) -> usize {
        self.sizes().min().unwrap_or(0)
    }

    /// Mean class size.
    pub fn mean_size(&self) -> f64 {
        if self.classes.is_empty() {
            return 0.0;
        }
        let total: usize = self.sizes().sum();
        total as f64 / self.classes.len() as f64
    }

    /// Iterate over classes as row-index slices.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.classes.iter().map(|c| c.as_slice())
    }
}
