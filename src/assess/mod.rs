//! End-to-end dataset assessment.

mod runner;

pub use runner::{
    assess, classify_names_or_fallback, metric_bag, AssessOptions, INSUFFICIENT_MESSAGE,
};
