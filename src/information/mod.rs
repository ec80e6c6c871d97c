//! Information-theoretic metrics linking quasi-identifiers to
//! sensitive attributes.

mod conditional;
mod mutual;
mod uncertainty;

pub use conditional::conditional_entropy_score;
pub use mutual::{mutual_information, mutual_information_pair};
pub use uncertainty::{
    uncertainty_profile, uncertainty_summary, UncertaintyProfile, UncertaintySummary,
};
