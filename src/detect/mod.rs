//! Column-name classification.
//!
//! Assigns dataset columns to privacy roles from their names alone,
//! before any values are inspected. Two classifiers are provided: a
//! remote LLM-backed one ([`GeminiClassifier`]) and a local keyword
//! fallback ([`KeywordClassifier`]). Both speak the same JSON shape.

mod gemini;
mod keyword;

pub use gemini::GeminiClassifier;
pub use keyword::KeywordClassifier;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PrivacyError, Result};

/// Column names grouped by privacy role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameClassification {
    #[serde(default)]
    pub personal_identifiers: Vec<String>,
    #[serde(default)]
    pub quasi_identifiers: Vec<String>,
    #[serde(default)]
    pub sensitive_attributes: Vec<String>,
    #[serde(default)]
    pub neither: Vec<String>,
}

impl NameClassification {
    /// Category sizes as (personal, quasi, sensitive, neither).
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.personal_identifiers.len(),
            self.quasi_identifiers.len(),
            self.sensitive_attributes.len(),
            self.neither.len(),
        )
    }

    /// Total number of classified columns.
    pub fn len(&self) -> usize {
        let (p, q, s, n) = self.counts();
        p + q + s + n
    }

    /// Whether no columns were classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A strategy for classifying column names into privacy roles.
pub trait NameClassifier {
    fn classify_names(&self, names: &[String]) -> Result<NameClassification>;
}

/// Parse a classifier response, stripping a Markdown ```json fence if
/// one wraps the payload. Missing categories default to empty lists.
pub fn parse_classification(response: &str) -> Result<NameClassification> {
    let trimmed = response.trim();
    let fence = Regex::new(r"(?s)^```json\s*(.*?)\s*```$").unwrap();
    let payload = match fence.captures(trimmed) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(trimmed),
        None => trimmed,
    };
    serde_json::from_str(payload.trim())
        .map_err(|e| PrivacyError::Classifier(format!("failed to parse response: {}", e)))
}
