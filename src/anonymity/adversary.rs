//! Adversary-centric risk measures: per-class success rates, average
//! re-identification probability, and presence disclosure against a
//! reference population.

use crate::data::{EquivalenceClasses, Table, Value};
use crate::error::{PrivacyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-class adversary success probabilities (1 / class size).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdversaryProfile {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    /// Number of equivalence classes.
    pub classes: usize,
}

impl AdversaryProfile {
    /// Copy with rates rounded to four decimal places, for reporting.
    pub fn rounded(&self) -> Self {
        Self {
            average: round4(self.average),
            max: round4(self.max),
            min: round4(self.min),
            classes: self.classes,
        }
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Success probability of an adversary who knows a row's
/// quasi-identifier tuple: 1 / class size, summarized over classes.
pub fn adversary_success_rate(table: &Table, qids: &[String]) -> Result<AdversaryProfile> {
    let classes = EquivalenceClasses::from_table(table, qids)?;
    let rates: Vec<f64> = classes.sizes().map(|s| 1.0 / s as f64).collect();

    let average = rates.iter().sum::<f64>() / rates.len() as f64;
    let max = rates.iter().cloned().fold(f64::MIN, f64::max);
    let min = rates.iter().cloned().fold(f64::MAX, f64::min);

    Ok(AdversaryProfile {
        average,
        max,
        min,
        classes: rates.len(),
    })
}

/// Mean over rows of the re-identification probability 1 / |class(row)|.
///
/// Each class contributes size * (1 / size) = 1, so this equals
/// classes / rows and lies in (0, 1].
pub fn reidentification_risk(table: &Table, qids: &[String]) -> Result<f64> {
    let classes = EquivalenceClasses::from_table(table, qids)?;
    Ok(classes.len() as f64 / table.n_rows() as f64)
}

/// Overlap between a working table and a reference population.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeltaPresence {
    /// Fraction of working rows present in the reference table.
    pub delta: f64,
    pub shared_records: usize,
    pub published_records: usize,
}

/// Fraction of the working table's rows whose full row tuple appears in
/// the reference table.
///
/// The two tables must carry the same columns; order may differ.
pub fn delta_presence(working: &Table, reference: &Table) -> Result<DeltaPresence> {
    let ref_cols: Vec<&[Value]> = working
        .column_names()
        .iter()
        .map(|name| reference.column(name))
        .collect::<Result<_>>()?;
    // The lookups above reject working columns absent from the reference;
    // the reverse direction needs its own check.
    if let Some(extra) = reference
        .column_names()
        .iter()
        .find(|name| !working.has_column(name))
    {
        return Err(PrivacyError::MissingColumn(extra.clone()));
    }

    let mut seen: HashSet<Vec<&Value>> = HashSet::with_capacity(reference.n_rows());
    for row in 0..reference.n_rows() {
        seen.insert(ref_cols.iter().map(|col| &col[row]).collect());
    }

    let work_cols: Vec<&[Value]> = working
        .column_names()
        .iter()
        .map(|name| working.column(name))
        .collect::<Result<_>>()?;
    let shared = (0..working.n_rows())
        .filter(|&row| {
            let key: Vec<&Value> = work_cols.iter().map(|col| &col[row]).collect();
            seen.contains(&key)
        })
        .count();

    Ok(DeltaPresence {
        delta: shared as f64 / working.n_rows() as f64,
        shared_records: shared,
        published_records: working.n_rows(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_table() -> Table {
        // Classes of sizes 2 and 3 under "age".
        Table::from_rows(
            &["age", "diagnosis"],
            &[
                vec!["34", "flu"],
                vec!["34", "cold"],
                vec!["29", "flu"],
                vec!["29", "asthma"],
                vec!["29", "cold"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_adversary_success_rate() {
        let table = create_test_table();
        let profile = adversary_success_rate(&table, &strings(&["age"])).unwrap();

        assert_eq!(profile.classes, 2);
        assert_relative_eq!(profile.max, 0.5);
        assert_relative_eq!(profile.min, 1.0 / 3.0);
        assert_relative_eq!(profile.average, (0.5 + 1.0 / 3.0) / 2.0);
    }

    #[test]
    fn test_rounding_for_report() {
        let table = create_test_table();
        let profile = adversary_success_rate(&table, &strings(&["age"]))
            .unwrap()
            .rounded();
        assert_relative_eq!(profile.min, 0.3333);
    }

    #[test]
    fn test_reidentification_risk() {
        let table = create_test_table();
        // 2 classes over 5 rows.
        assert_relative_eq!(
            reidentification_risk(&table, &strings(&["age"])).unwrap(),
            0.4
        );
    }

    #[test]
    fn test_all_distinct_risk_is_one() {
        let table = Table::from_rows(
            &["id"],
            &[vec!["a"], vec!["b"], vec!["c"]],
        )
        .unwrap();
        assert_relative_eq!(
            reidentification_risk(&table, &strings(&["id"])).unwrap(),
            1.0
        );
        let profile = adversary_success_rate(&table, &strings(&["id"])).unwrap();
        assert_relative_eq!(profile.average, 1.0);
    }

    #[test]
    fn test_single_class_risk_is_inverse_rows() {
        // One constant quasi-identifier: all four rows share a class.
        let table = Table::from_rows(
            &["site", "diagnosis"],
            &[
                vec!["main", "flu"],
                vec!["main", "cold"],
                vec!["main", "asthma"],
                vec!["main", "flu"],
            ],
        )
        .unwrap();

        let qids = strings(&["site"]);
        assert_relative_eq!(reidentification_risk(&table, &qids).unwrap(), 0.25);

        let profile = adversary_success_rate(&table, &qids).unwrap();
        assert_eq!(profile.classes, 1);
        assert_relative_eq!(profile.average, 0.25);
        assert_relative_eq!(profile.max, 0.25);
        assert_relative_eq!(profile.min, 0.25);
    }

    #[test]
    fn test_delta_presence_identical() {
        let table = create_test_table();
        let overlap = delta_presence(&table, &table).unwrap();
        assert_relative_eq!(overlap.delta, 1.0);
        assert_eq!(overlap.shared_records, 5);
        assert_eq!(overlap.published_records, 5);
    }

    #[test]
    fn test_delta_presence_disjoint() {
        let working = create_test_table();
        let reference = Table::from_rows(
            &["age", "diagnosis"],
            &[vec!["60", "flu"], vec!["61", "cold"]],
        )
        .unwrap();

        let overlap = delta_presence(&working, &reference).unwrap();
        assert_relative_eq!(overlap.delta, 0.0);
        assert_eq!(overlap.shared_records, 0);
    }

    #[test]
    fn test_delta_presence_partial_and_column_order() {
        let working = create_test_table();
        // Same columns in a different order; two rows overlap.
        let reference = Table::from_rows(
            &["diagnosis", "age"],
            &[vec!["flu", "34"], vec!["cold", "34"], vec!["flu", "99"]],
        )
        .unwrap();

        let overlap = delta_presence(&working, &reference).unwrap();
        assert_eq!(overlap.shared_records, 2);
        assert_relative_eq!(overlap.delta, 0.4);
    }

    #[test]
    fn test_delta_presence_mismatched_columns() {
        let working = create_test_table();

        // Reference lacks a working column.
        let narrower = Table::from_rows(&["age"], &[vec!["34"]]).unwrap();
        let err = delta_presence(&working, &narrower).unwrap_err();
        assert!(matches!(err, PrivacyError::MissingColumn(name) if name == "diagnosis"));

        // Reference carries a column the working table lacks.
        let wider = Table::from_rows(
            &["age", "diagnosis", "zip"],
            &[vec!["34", "flu", "02139"]],
        )
        .unwrap();
        let err = delta_presence(&working, &wider).unwrap_err();
        assert!(matches!(err, PrivacyError::MissingColumn(name) if name == "zip"));
    }
}
