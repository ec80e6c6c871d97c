//! Gemini-backed column-name classifier.

use serde::Deserialize;
use serde_json::json;

use crate::detect::{parse_classification, NameClassification, NameClassifier};
use crate::error::{PrivacyError, Result};

const API_KEY_VAR: &str = "GEMINI_PRO_API_KEY";
const DEFAULT_MODEL: &str = "gemini-pro";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Classifies column names by prompting the Gemini generative API.
pub struct GeminiClassifier {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

impl GeminiClassifier {
    /// Build a classifier with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Build a classifier from the `GEMINI_PRO_API_KEY` environment
    /// variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            PrivacyError::Classifier(format!("{} is missing from environment", API_KEY_VAR))
        })?;
        Ok(Self::new(api_key))
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn prompt(names: &[String]) -> String {
        format!(
            "You are an expert in data classification and privacy protection. \
             Given a list of dataset column names, categorize each into one of the following classes: \n\
             1. Personal Identifiers (Directly identify an individual, e.g., full name, phone number, SSN, passport number)\n\
             2. Quasi-Identifiers (Do not directly identify an individual but can be used in combination to do so, e.g., age, gender, zip code, job title, IP address)\n\
             3. Sensitive Attributes (Highly confidential data that can cause harm or discrimination if exposed, e.g., medical history, financial data, criminal record, political views)\n\
             4. Neither (Columns that do not fall into any of the above categories)\n\
             Return the output as a valid JSON object with double quotes, formatted as follows: \n\
             {{ \"personal_identifiers\": [...], \"quasi_identifiers\": [...], \"sensitive_attributes\": [...], \"neither\": [...] }}\n\
             Column names: {:?}",
            names
        )
    }

    fn request(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.3,
                "topP": 0.9,
                "topK": 40,
                "maxOutputTokens": 500,
            }
        });
        let response: GenerateResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| {
                PrivacyError::Classifier("empty response from Gemini".to_string())
            })?;
        Ok(text)
    }
}

impl NameClassifier for GeminiClassifier {
    fn classify_names(&self, names: &[String]) -> Result<NameClassification> {
        if names.is_empty() {
            return Err(PrivacyError::Classifier(
                "no column names provided".to_string(),
            ));
        }
        let text = self.request(&Self::prompt(names))?;
        parse_classification(&text)
    }
}
