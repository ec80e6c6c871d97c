//! Scoring context: regulation, localisation, deployment shape, and
//! encryption posture.
//!
//! Unknown spellings never fail: every enum carries a neutral fallback
//! variant so a config file with an unrecognized value degrades to the
//! default factor instead of erroring.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Regulatory regime the dataset falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Regulation {
    Gdpr,
    Hipaa,
    #[default]
    #[serde(other)]
    Other,
}

impl Regulation {
    /// Parse a user-supplied name; unrecognized values map to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gdpr" => Self::Gdpr,
            "hipaa" => Self::Hipaa,
            _ => Self::Other,
        }
    }

    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gdpr => "gdpr",
            Self::Hipaa => "hipaa",
            Self::Other => "other",
        }
    }
}

/// Jurisdiction the data subjects live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Localisation {
    Eu,
    Us,
    #[default]
    #[serde(other)]
    Other,
}

impl Localisation {
    /// Parse a user-supplied name; unrecognized values map to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "eu" => Self::Eu,
            "us" => Self::Us,
            _ => Self::Other,
        }
    }

    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eu => "eu",
            Self::Us => "us",
            Self::Other => "other",
        }
    }
}

/// How the data is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataDistribution {
    Centralized,
    Federated,
    Decentralized,
    #[default]
    #[serde(other)]
    Other,
}

impl DataDistribution {
    /// Parse a user-supplied name; unrecognized values map to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "centralized" => Self::Centralized,
            "federated" => Self::Federated,
            "decentralized" => Self::Decentralized,
            _ => Self::Other,
        }
    }

    /// Exposure multiplier: centralized data concentrates risk, spread
    /// deployments dilute it.
    pub fn factor(&self) -> f64 {
        match self {
            Self::Centralized => 1.2,
            Self::Federated => 0.9,
            Self::Decentralized => 0.7,
            Self::Other => 1.0,
        }
    }

    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Centralized => "centralized",
            Self::Federated => "federated",
            Self::Decentralized => "decentralized",
            Self::Other => "other",
        }
    }
}

/// Encryption posture protecting the data at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionScheme {
    None,
    Symmetric,
    AdvancedSymmetric,
    Asymmetric,
    Hybrid,
    Homomorphic,
    #[default]
    #[serde(other)]
    Other,
}

impl EncryptionScheme {
    /// Parse a user-supplied name; unrecognized values map to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().replace(' ', "_").as_str() {
            "none" => Self::None,
            "symmetric" => Self::Symmetric,
            "advanced_symmetric" => Self::AdvancedSymmetric,
            "asymmetric" => Self::Asymmetric,
            "hybrid" => Self::Hybrid,
            "homomorphic" => Self::Homomorphic,
            _ => Self::Other,
        }
    }

    /// Exposure multiplier: stronger schemes shrink the residual need.
    pub fn factor(&self) -> f64 {
        match self {
            Self::None => 1.5,
            Self::Symmetric => 1.2,
            Self::AdvancedSymmetric => 1.0,
            Self::Asymmetric => 0.8,
            Self::Hybrid => 0.6,
            Self::Homomorphic => 0.3,
            Self::Other => 1.0,
        }
    }

    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Symmetric => "symmetric",
            Self::AdvancedSymmetric => "advanced_symmetric",
            Self::Asymmetric => "asymmetric",
            Self::Hybrid => "hybrid",
            Self::Homomorphic => "homomorphic",
            Self::Other => "other",
        }
    }
}

/// Context for the privacy-need aggregation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub regulation: Regulation,
    pub localisation: Localisation,
    pub distribution: DataDistribution,
    pub encryption: EncryptionScheme,
}

impl ScoringConfig {
    /// Load a scoring config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
