//! Per-column profile types.

mod column;
mod types;

pub use column::{ColumnProfile, SummaryRow};
pub use types::{ColumnKind, NumericSummary};
