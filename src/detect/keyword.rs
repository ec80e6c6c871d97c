//! Offline keyword-based column-name classifier.
//!
//! Used when no API key is available or the remote classifier fails.
//! Matching is token-based: the name is lowercased, split on
//! non-alphanumeric characters, and each token is compared against the
//! marker lists. Personal markers win over sensitive, sensitive over
//! quasi.

use crate::detect::{NameClassification, NameClassifier};
use crate::error::Result;

const PERSONAL_MARKERS: &[&str] = &[
    "name", "fullname", "firstname", "lastname", "surname", "email", "mail", "phone",
    "telephone", "ssn", "passport", "license", "id", "identifier",
];

const SENSITIVE_MARKERS: &[&str] = &[
    "diagnosis", "disease", "medical", "health", "condition", "treatment", "medication",
    "salary", "income", "balance", "debt", "credit", "financial", "criminal", "religion",
    "religious", "political", "ethnicity", "race", "blood", "pressure", "hiv", "mental",
];

const QUASI_MARKERS: &[&str] = &[
    "age", "gender", "sex", "zip", "zipcode", "postal", "postcode", "birth", "birthday",
    "dob", "city", "state", "country", "region", "job", "occupation", "title",
    "education", "nationality", "ip",
];

/// Classifies column names by keyword lookup, no network required.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn tokens(name: &str) -> Vec<String> {
        name.to_ascii_lowercase()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect()
    }

    fn matches(tokens: &[String], markers: &[&str]) -> bool {
        tokens.iter().any(|t| markers.contains(&t.as_str()))
    }
}

impl NameClassifier for KeywordClassifier {
    fn classify_names(&self, names: &[String]) -> Result<NameClassification> {
        let mut result = NameClassification::default();
        for name in names {
            let tokens = Self::tokens(name);
            if Self::matches(&tokens, PERSONAL_MARKERS) {
                result.personal_identifiers.push(name.clone());
            } else if Self::matches(&tokens, SENSITIVE_MARKERS) {
                result.sensitive_attributes.push(name.clone());
            } else if Self::matches(&tokens, QUASI_MARKERS) {
                result.quasi_identifiers.push(name.clone());
            } else {
                result.neither.push(name.clone());
            }
        }
        Ok(result)
    }
}
