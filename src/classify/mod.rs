//! Risk-based column classification and quasi-identifier selection.

mod risk;
mod subset;

pub use risk::{
    classify_columns, risk_score, Classification, ColumnRisk, ColumnRole, RiskBands,
};
pub use subset::{
    optimal_qid_subset, uniqueness, utility_entropy, SubsetSearch, SubsetSearchConfig,
};
