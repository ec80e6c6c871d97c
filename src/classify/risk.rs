//! Distinctness-risk scoring and role classification for columns.

use crate::data::Table;
use crate::error::{PrivacyError, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Privacy role assigned to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Directly identifies an individual (name, phone number, SSN).
    PersonalIdentifier,
    /// Identifies an individual in combination with others (age, zip).
    QuasiIdentifier,
    /// Confidential content that causes harm if exposed (diagnosis).
    SensitiveAttribute,
    /// None of the above.
    NonSensitive,
}

impl ColumnRole {
    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PersonalIdentifier => "personal_identifier",
            Self::QuasiIdentifier => "quasi_identifier",
            Self::SensitiveAttribute => "sensitive_attribute",
            Self::NonSensitive => "non_sensitive",
        }
    }
}

/// Risk bands routing a column's distinctness risk to a role.
///
/// Bands are checked in order: the quasi-identifier band is half-open
/// `[lo, hi)`, the sensitive band closed `[lo, hi]`, and anything left
/// is non-sensitive. A column with risk exactly at the quasi upper
/// bound therefore lands in the sensitive band when the two touch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskBands {
    pub quasi: (f64, f64),
    pub sensitive: (f64, f64),
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            quasi: (0.3, 0.8),
            sensitive: (0.8, 1.0),
        }
    }
}

impl RiskBands {
    /// Check that both bands are well-formed sub-ranges of [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, (lo, hi)) in [("quasi", self.quasi), ("sensitive", self.sensitive)] {
            if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
                return Err(PrivacyError::InvalidParameter(format!(
                    "{} band ({}, {}) must satisfy 0 <= lo <= hi <= 1",
                    name, lo, hi
                )));
            }
        }
        Ok(())
    }

    /// Route a risk value to a role. The first matching band wins.
    pub fn role_for(&self, risk: f64) -> ColumnRole {
        if risk >= self.quasi.0 && risk < self.quasi.1 {
            ColumnRole::QuasiIdentifier
        } else if risk >= self.sensitive.0 && risk <= self.sensitive.1 {
            ColumnRole::SensitiveAttribute
        } else {
            ColumnRole::NonSensitive
        }
    }
}

/// A column's distinctness risk and the role it was routed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRisk {
    pub column: String,
    pub risk: f64,
    pub role: ColumnRole,
}

/// Result of risk-based column classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Per-column risk and role, in table column order.
    pub risk_scores: Vec<ColumnRisk>,
    pub quasi_identifiers: Vec<String>,
    pub sensitive_attributes: Vec<String>,
    pub non_sensitive: Vec<String>,
}

impl Classification {
    /// Role assigned to a column, if it was classified.
    pub fn role_of(&self, column: &str) -> Option<ColumnRole> {
        self.risk_scores
            .iter()
            .find(|r| r.column == column)
            .map(|r| r.role)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Quasi-identifiers:    {:?}", self.quasi_identifiers)?;
        writeln!(f, "Sensitive attributes: {:?}", self.sensitive_attributes)?;
        writeln!(f, "Non-sensitive:        {:?}", self.non_sensitive)?;
        for r in &self.risk_scores {
            writeln!(f, "  {}: {:.3} ({})", r.column, r.risk, r.role.name())?;
        }
        Ok(())
    }
}

/// Distinctness risk of a single column: the mean over rows of the
/// reciprocal frequency of the row's value.
///
/// The result is in (0, 1]: 1.0 means every value is unique, 1/n means
/// the column is constant.
pub fn risk_score(table: &Table, column: &str) -> Result<f64> {
    let values = table.column(column)?;
    let counts = table.value_counts(column)?;
    let total: f64 = values
        .iter()
        .map(|v| 1.0 / counts.get(v).copied().unwrap_or(1) as f64)
        .sum();
    Ok(total / values.len() as f64)
}

/// Classify every column of a table by distinctness risk.
pub fn classify_columns(table: &Table, bands: &RiskBands) -> Result<Classification> {
    bands.validate()?;

    let mut risk_scores = Vec::with_capacity(table.n_cols());
    let mut quasi_identifiers = Vec::new();
    let mut sensitive_attributes = Vec::new();
    let mut non_sensitive = Vec::new();

    for name in table.column_names() {
        let risk = risk_score(table, name)?;
        let role = bands.role_for(risk);
        match role {
            ColumnRole::QuasiIdentifier => quasi_identifiers.push(name.clone()),
            ColumnRole::SensitiveAttribute => sensitive_attributes.push(name.clone()),
            _ => non_sensitive.push(name.clone()),
        }
        risk_scores.push(ColumnRisk {
            column: name.clone(),
            risk,
            role,
        });
    }

    debug!(
        "classified {} columns: {} quasi, {} sensitive, {} non-sensitive",
        risk_scores.len(),
        quasi_identifiers.len(),
        sensitive_attributes.len(),
        non_sensitive.len()
    );

    Ok(Classification {
        risk_scores,
        quasi_identifiers,
        sensitive_attributes,
        non_sensitive,
    })
}
