//! Column kind classification.

use serde::{Deserialize, Serialize};

/// Inferred kind of a column.
///
/// A column is numeric when it has at least one non-missing value and every
/// non-missing value parses as a finite number. Everything else, including a
/// column with no values at all, is categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Numeric column with its descriptive summary.
    Numeric(NumericSummary),
    /// Categorical/text column.
    Categorical,
}

impl ColumnKind {
    /// Returns true if this is a numeric column.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric(_))
    }

    /// Returns true if this is a categorical column.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnKind::Categorical)
    }

    /// Numeric summary, if numeric.
    pub fn numeric(&self) -> Option<&NumericSummary> {
        match self {
            ColumnKind::Numeric(summary) => Some(summary),
            ColumnKind::Categorical => None,
        }
    }

    /// Short lowercase name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Numeric(_) => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// Descriptive statistics of a numeric column (non-missing values only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Share of non-missing values equal to zero.
    pub zero_share: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1); 0 for a single value.
    pub std: f64,
}
