//! Anonymity metrics over equivalence-class partitions.

mod adversary;
mod closeness;
mod diversity;
mod kanon;

pub use adversary::{
    adversary_success_rate, delta_presence, reidentification_risk, AdversaryProfile,
    DeltaPresence,
};
pub use closeness::t_closeness;
pub use diversity::{l_diversity_distinct, l_diversity_entropy};
pub use kanon::{alpha_k_anonymity, k_anonymity, AlphaK};
