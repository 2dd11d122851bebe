//! Quality assessment from aggregated dataset metrics only.
//!
//! Used when a caller already knows the shape of its dataset and does not
//! send the data itself.

use serde::{Deserialize, Serialize};

use crate::error::{EdaError, Result};

use super::flags::{QualityConfig, QualityFlags};
use super::score::{QualityScorer, ScoreInputs, ScoreWeights};

const OK_MESSAGE: &str = "Data looks sufficient for model training (simplified heuristics).";
const NOT_OK_MESSAGE: &str =
    "Data quality is insufficient for model training, rework is needed (simplified heuristics).";

/// Aggregated description of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetrics {
    pub n_rows: usize,
    pub n_cols: usize,
    pub max_missing_share: f64,
    pub numeric_cols: usize,
    pub categorical_cols: usize,
}

impl DatasetMetrics {
    /// Reject shares outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.max_missing_share) {
            return Err(EdaError::Validation(format!(
                "max_missing_share must be within [0, 1], got {}",
                self.max_missing_share
            )));
        }
        Ok(())
    }
}

/// Flags available from aggregated metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFlags {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub no_numeric_columns: bool,
    pub no_categorical_columns: bool,
}

/// Verdict on a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsAssessment {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub message: String,
    pub flags: MetricFlags,
}

impl MetricsAssessment {
    /// Build the verdict for an already computed score.
    pub fn new(quality_score: f64, flags: MetricFlags, config: &QualityConfig) -> Self {
        let ok_for_model = quality_score >= config.ok_score_threshold;
        let message = if ok_for_model { OK_MESSAGE } else { NOT_OK_MESSAGE };

        Self {
            ok_for_model,
            quality_score,
            message: message.to_string(),
            flags,
        }
    }
}

/// Derive flags from metrics alone.
pub fn metric_flags(metrics: &DatasetMetrics, config: &QualityConfig) -> MetricFlags {
    MetricFlags {
        too_few_rows: metrics.n_rows < config.min_rows,
        too_many_columns: metrics.n_cols > config.max_columns,
        too_many_missing: metrics.max_missing_share > config.missing_share_threshold,
        no_numeric_columns: metrics.numeric_cols == 0,
        no_categorical_columns: metrics.categorical_cols == 0,
    }
}

/// Assess a dataset from aggregated metrics. Column-level penalties are
/// unknown here and count as zero.
pub fn assess_metrics(
    metrics: &DatasetMetrics,
    config: &QualityConfig,
    weights: &ScoreWeights,
) -> Result<MetricsAssessment> {
    metrics.validate()?;
    config.validate()?;

    let flags = metric_flags(metrics, config);
    let quality_flags = QualityFlags {
        too_few_rows: flags.too_few_rows,
        too_many_columns: flags.too_many_columns,
        too_many_missing: flags.too_many_missing,
        ..QualityFlags::default()
    };
    let inputs = ScoreInputs {
        max_missing_share: metrics.max_missing_share,
        ..ScoreInputs::default()
    };
    let score = QualityScorer::new(weights.clone()).score(&quality_flags, &inputs);

    Ok(MetricsAssessment::new(score, flags, config))
}
