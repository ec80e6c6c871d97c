//! Error types for the privscore library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum PrivacyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("Missing score for principle '{0}'")]
    MissingPrinciple(String),

    #[error("Score {value} for principle '{principle}' is outside [0, 100]")]
    PrincipleOutOfRange { principle: String, value: f64 },

    #[error("Column classifier error: {0}")]
    Classifier(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, PrivacyError>;
