//! Tabular data handling for privacy assessment.

use crate::error::{PrivacyError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::path::Path;

/// Tokens treated as missing values when parsing cells.
const MISSING_TOKENS: &[&str] = &["", "NA", "na", "NaN", "null"];

/// A cell value: free text, a finite number, or missing.
///
/// Values are hashable so they can key frequency maps and equivalence
/// classes. Numbers are always finite (non-finite input parses to
/// `Missing`) and compare by canonical bit pattern, with `-0.0`
/// normalized to `0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Number(f64),
    Missing,
}

impl Value {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Try to get as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    fn canonical_bits(v: f64) -> u64 {
        if v == 0.0 {
            0f64.to_bits()
        } else {
            v.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                Value::canonical_bits(*a) == Value::canonical_bits(*b)
            }
            (Value::Missing, Value::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Text(s) => {
                state.write_u8(0);
                s.hash(state);
            }
            Value::Number(v) => {
                state.write_u8(1);
                state.write_u64(Value::canonical_bits(*v));
            }
            Value::Missing => state.write_u8(2),
        }
    }
}

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
}

/// An immutable table of named columns loaded from CSV or built in memory.
///
/// Columns are typed by inference: a column whose non-missing cells all
/// parse as numbers holds `Value::Number`, otherwise `Value::Text`.
/// Empty, `NA`, `na`, `NaN` and `null` cells are `Value::Missing`.
#[derive(Debug, Clone)]
pub struct Table {
    column_names: Vec<String>,
    columns: Vec<Vec<Value>>,
    kinds: Vec<ColumnKind>,
    n_rows: usize,
}

impl Table {
    /// Load a table from a CSV file with a header row.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a table from any CSV reader with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let column_names: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            raw_rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Self::build(column_names, raw_rows)
    }

    /// Build a table from in-memory rows, using the same type inference
    /// as CSV loading.
    pub fn from_rows(column_names: &[&str], rows: &[Vec<&str>]) -> Result<Self> {
        let names: Vec<String> = column_names.iter().map(|s| s.to_string()).collect();
        let raw_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
        Self::build(names, raw_rows)
    }

    fn build(column_names: Vec<String>, raw_rows: Vec<Vec<String>>) -> Result<Self> {
        if column_names.is_empty() {
            return Err(PrivacyError::EmptyData("table has no columns".to_string()));
        }
        if raw_rows.is_empty() {
            return Err(PrivacyError::EmptyData("table has no rows".to_string()));
        }
        for (idx, row) in raw_rows.iter().enumerate() {
            if row.len() != column_names.len() {
                return Err(PrivacyError::InvalidParameter(format!(
                    "row {} has {} fields, expected {}",
                    idx,
                    row.len(),
                    column_names.len()
                )));
            }
        }

        // Infer column kinds from the non-missing cells.
        let kinds: Vec<ColumnKind> = (0..column_names.len())
            .map(|col| {
                let all_numeric = raw_rows.iter().all(|row| {
                    let cell = row[col].trim();
                    is_missing_token(cell) || cell.parse::<f64>().is_ok()
                });
                if all_numeric {
                    ColumnKind::Number
                } else {
                    ColumnKind::Text
                }
            })
            .collect();

        let n_rows = raw_rows.len();
        let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(n_rows); column_names.len()];
        for row in &raw_rows {
            for (col, cell) in row.iter().enumerate() {
                columns[col].push(parse_cell(cell.trim(), kinds[col]));
            }
        }

        Ok(Self {
            column_names,
            columns,
            kinds,
            n_rows,
        })
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.column_names.len()
    }

    /// Check if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// All values of a column, in row order.
    pub fn column(&self, name: &str) -> Result<&[Value]> {
        let idx = self
            .column_names
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PrivacyError::MissingColumn(name.to_string()))?;
        Ok(&self.columns[idx])
    }

    /// Inferred kind of a column.
    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .map(|idx| self.kinds[idx])
    }

    /// Occurrence count of each distinct value in a column.
    pub fn value_counts(&self, name: &str) -> Result<HashMap<&Value, usize>> {
        let values = self.column(name)?;
        let mut counts: HashMap<&Value, usize> = HashMap::new();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

fn is_missing_token(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell)
}

fn parse_cell(cell: &str, kind: ColumnKind) -> Value {
    if is_missing_token(cell) {
        return Value::Missing;
    }
    match kind {
        ColumnKind::Number => match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => Value::Number(v),
            _ => Value::Missing,
        },
        ColumnKind::Text => Value::Text(cell.to_string()),
    }
}
