//! Aggregation of flags and raw metrics into a single score.

use serde::{Deserialize, Serialize};

use super::flags::{QualityDetails, QualityFlags};

/// Penalty weights subtracted from a perfect score of 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub too_few_rows: f64,
    pub too_many_columns: f64,
    /// Per constant column.
    pub constant_column: f64,
    /// Per high-cardinality categorical column.
    pub high_cardinality_column: f64,
    /// Per zero-heavy numeric column.
    pub zero_heavy_column: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            too_few_rows: 0.2,
            too_many_columns: 0.1,
            constant_column: 0.05,
            high_cardinality_column: 0.05,
            zero_heavy_column: 0.05,
        }
    }
}

/// Raw metrics the score is computed from, besides the flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Subtracted as-is, whether or not `too_many_missing` is raised.
    pub max_missing_share: f64,
    pub constant_columns: usize,
    pub high_cardinality_columns: usize,
    pub zero_heavy_columns: usize,
}

impl ScoreInputs {
    pub fn from_details(details: &QualityDetails) -> Self {
        Self {
            max_missing_share: details.max_missing_share,
            constant_columns: details.constant_columns.len(),
            high_cardinality_columns: details.high_cardinality_columns.len(),
            zero_heavy_columns: details.zero_heavy_columns.len(),
        }
    }
}

/// Computes the quality score in `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    weights: ScoreWeights,
}

impl QualityScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Sum of independent penalties, clamped to `[0, 1]`.
    pub fn score(&self, flags: &QualityFlags, inputs: &ScoreInputs) -> f64 {
        let w = &self.weights;
        let mut penalty = inputs.max_missing_share.max(0.0);

        if flags.too_few_rows {
            penalty += w.too_few_rows;
        }
        if flags.too_many_columns {
            penalty += w.too_many_columns;
        }
        penalty += w.constant_column * inputs.constant_columns as f64;
        penalty += w.high_cardinality_column * inputs.high_cardinality_columns as f64;
        penalty += w.zero_heavy_column * inputs.zero_heavy_columns as f64;

        let score = 1.0 - penalty;
        if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) }
    }
}
