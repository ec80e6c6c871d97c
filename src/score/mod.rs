//! Privacy-need scoring: context configuration and metric aggregation.

mod aggregator;
mod config;

pub use aggregator::{
    aggregate, compliance_factor, k_anonymity_factor, keys, l_diversity_factor,
    t_closeness_factor, MetricBag, NeedLevel, PrivacyScore,
};
pub use config::{DataDistribution, EncryptionScheme, Localisation, Regulation, ScoringConfig};
