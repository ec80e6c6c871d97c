//! Data structures for privacy assessment.

mod equivalence;
mod report;
mod table;

pub use equivalence::EquivalenceClasses;
pub use report::{AnonymityBlock, AssessmentReport, InformationBlock, ReportMeta};
pub use table::{ColumnKind, Table, Value};
