//! Column profile definition.

use serde::{Deserialize, Serialize};

use super::types::ColumnKind;

/// Immutable profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Inferred kind, with numeric statistics when numeric.
    pub kind: ColumnKind,
    /// Number of non-missing values.
    pub non_missing_count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// missing_count / row_count (0 for an empty table).
    pub missing_share: f64,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// At most one distinct value among non-missing values. Never true for a
    /// column with no values.
    pub is_constant: bool,
    /// A few distinct values in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_values: Vec<String>,
}

impl ColumnProfile {
    /// Returns true if the column is numeric.
    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    /// Returns true if the column is categorical.
    pub fn is_categorical(&self) -> bool {
        self.kind.is_categorical()
    }

    /// Share of zeros, for numeric columns only.
    pub fn zero_share(&self) -> Option<f64> {
        self.kind.numeric().map(|n| n.zero_share)
    }

    /// Flatten into a printable row.
    pub fn summary_row(&self) -> SummaryRow {
        let numeric = self.kind.numeric();
        SummaryRow {
            name: self.name.clone(),
            kind: self.kind.name().to_string(),
            non_missing: self.non_missing_count,
            missing: self.missing_count,
            missing_share: self.missing_share,
            unique: self.unique_count,
            is_constant: self.is_constant,
            zero_share: numeric.map(|n| n.zero_share),
            min: numeric.map(|n| n.min),
            max: numeric.map(|n| n.max),
            mean: numeric.map(|n| n.mean),
            std: numeric.map(|n| n.std),
            example_values: self.example_values.join("; "),
        }
    }
}

/// Flat, one-line view of a [`ColumnProfile`], used for console tables and
/// `summary.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub kind: String,
    pub non_missing: usize,
    pub missing: usize,
    pub missing_share: f64,
    pub unique: usize,
    pub is_constant: bool,
    pub zero_share: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub example_values: String,
}
