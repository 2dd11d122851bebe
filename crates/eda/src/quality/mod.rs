//! Data-quality flags and scoring built on top of profile fragments.

mod flags;
mod metrics;
mod score;

pub use flags::{
    FlagEvaluation, QualityConfig, QualityDetails, QualityFlagEvaluator, QualityFlags,
};
pub use metrics::{DatasetMetrics, MetricFlags, MetricsAssessment, assess_metrics, metric_flags};
pub use score::{QualityScorer, ScoreInputs, ScoreWeights};
