//! Boolean data-quality heuristics.

use serde::{Deserialize, Serialize};

use crate::error::{EdaError, Result};
use crate::profile::MissingnessTable;
use crate::schema::ColumnProfile;

/// Thresholds for the quality heuristics.
///
/// Every comparison is exclusive: a value exactly at a threshold does not
/// raise a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// `too_few_rows` when row_count < min_rows.
    pub min_rows: usize,
    /// `too_many_columns` when column_count > max_columns.
    pub max_columns: usize,
    /// `too_many_missing` when max_missing_share > this.
    pub missing_share_threshold: f64,
    /// A categorical column is high-cardinality when unique_count > this.
    pub high_cardinality_threshold: usize,
    /// A numeric column is zero-heavy when zero_share > this.
    pub zero_share_threshold: f64,
    /// `ok_for_model` when the score is at least this.
    pub ok_score_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_rows: 100,
            max_columns: 100,
            missing_share_threshold: 0.5,
            high_cardinality_threshold: 50,
            zero_share_threshold: 0.5,
            ok_score_threshold: 0.7,
        }
    }
}

impl QualityConfig {
    pub fn with_missing_share_threshold(mut self, threshold: f64) -> Self {
        self.missing_share_threshold = threshold;
        self
    }

    pub fn with_high_cardinality_threshold(mut self, threshold: usize) -> Self {
        self.high_cardinality_threshold = threshold;
        self
    }

    pub fn with_zero_share_threshold(mut self, threshold: f64) -> Self {
        self.zero_share_threshold = threshold;
        self
    }

    /// Reject negative or non-finite thresholds.
    pub fn validate(&self) -> Result<()> {
        let shares = [
            ("missing_share_threshold", self.missing_share_threshold),
            ("zero_share_threshold", self.zero_share_threshold),
            ("ok_score_threshold", self.ok_score_threshold),
        ];
        for (name, value) in shares {
            if !value.is_finite() || value < 0.0 {
                return Err(EdaError::Validation(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Named boolean quality flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
    pub has_many_zero_values: bool,
}

impl QualityFlags {
    /// Flags as `(name, value)` pairs, in declaration order.
    pub fn entries(&self) -> [(&'static str, bool); 6] {
        [
            ("too_few_rows", self.too_few_rows),
            ("too_many_columns", self.too_many_columns),
            ("too_many_missing", self.too_many_missing),
            ("has_constant_columns", self.has_constant_columns),
            (
                "has_high_cardinality_categoricals",
                self.has_high_cardinality_categoricals,
            ),
            ("has_many_zero_values", self.has_many_zero_values),
        ]
    }

    /// True if any flag is raised.
    pub fn any(&self) -> bool {
        self.entries().iter().any(|(_, raised)| *raised)
    }
}

/// Columns behind each column-level flag, plus the raw maxima.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityDetails {
    pub max_missing_share: f64,
    /// Largest zero share over numeric columns (0 with none).
    pub max_zero_share: f64,
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<String>,
    pub zero_heavy_columns: Vec<String>,
}

/// Output of [`QualityFlagEvaluator::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagEvaluation {
    pub flags: QualityFlags,
    pub details: QualityDetails,
}

/// Derives [`QualityFlags`] from profile fragments.
#[derive(Debug, Clone, Default)]
pub struct QualityFlagEvaluator {
    config: QualityConfig,
}

impl QualityFlagEvaluator {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Evaluate every heuristic. Row count comes from the missingness table,
    /// column count from the profiles.
    pub fn evaluate(
        &self,
        columns: &[ColumnProfile],
        missingness: &MissingnessTable,
    ) -> FlagEvaluation {
        let cfg = &self.config;

        let constant_columns = names_where(columns, |c| c.is_constant);
        let high_cardinality_columns = names_where(columns, |c| {
            c.is_categorical() && c.unique_count > cfg.high_cardinality_threshold
        });
        let zero_heavy_columns = names_where(columns, |c| {
            c.zero_share()
                .is_some_and(|share| share > cfg.zero_share_threshold)
        });
        let max_zero_share = columns
            .iter()
            .filter_map(ColumnProfile::zero_share)
            .fold(0.0, f64::max);

        let flags = QualityFlags {
            too_few_rows: missingness.row_count < cfg.min_rows,
            too_many_columns: columns.len() > cfg.max_columns,
            too_many_missing: missingness.max_missing_share > cfg.missing_share_threshold,
            has_constant_columns: !constant_columns.is_empty(),
            has_high_cardinality_categoricals: !high_cardinality_columns.is_empty(),
            has_many_zero_values: !zero_heavy_columns.is_empty(),
        };

        FlagEvaluation {
            flags,
            details: QualityDetails {
                max_missing_share: missingness.max_missing_share,
                max_zero_share,
                constant_columns,
                high_cardinality_columns,
                zero_heavy_columns,
            },
        }
    }
}

fn names_where(columns: &[ColumnProfile], predicate: impl Fn(&ColumnProfile) -> bool) -> Vec<String> {
    columns
        .iter()
        .filter(|c| predicate(c))
        .map(|c| c.name.clone())
        .collect()
}
