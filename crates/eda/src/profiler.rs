//! Main `Profiler` struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EdaError, Result};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::profile::{
    CategoryProfiler, ColumnProfiler, CorrelationComputer, CorrelationMatrix, MissingnessAnalyzer,
    MissingnessTable, TopCategories,
};
use crate::quality::{
    DatasetMetrics, MetricFlags, MetricsAssessment, QualityConfig, QualityDetails,
    QualityFlagEvaluator, QualityFlags, QualityScorer, ScoreInputs, ScoreWeights,
};
use crate::schema::{ColumnProfile, SummaryRow};

/// Configuration for a profiling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Quality flag thresholds.
    pub quality: QualityConfig,
    /// Score penalty weights.
    pub weights: ScoreWeights,
    /// Values kept per categorical column.
    pub top_k: usize,
    /// Maximum categorical columns in the frequency tables (None = all).
    pub max_category_columns: Option<usize>,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            quality: QualityConfig::default(),
            weights: ScoreWeights::default(),
            top_k: 5,
            max_category_columns: None,
        }
    }
}

impl ProfilerConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_quality(mut self, quality: QualityConfig) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Check every part of the configuration.
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        self.quality.validate()?;
        if self.top_k < 1 {
            return Err(EdaError::Validation("top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Result of profiling a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Profiles, quality flags and score.
    pub report: DatasetReport,
}

/// Every profile fragment of one dataset plus its quality verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    pub missingness: MissingnessTable,
    /// Absent with fewer than two numeric columns.
    pub correlation: Option<CorrelationMatrix>,
    pub top_categories: TopCategories,
    pub flags: QualityFlags,
    pub details: QualityDetails,
    pub quality_score: f64,
}

impl DatasetReport {
    /// Get a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric_column_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_numeric()).count()
    }

    pub fn categorical_column_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_categorical()).count()
    }

    /// Aggregated shape of the dataset.
    pub fn metrics(&self) -> DatasetMetrics {
        DatasetMetrics {
            n_rows: self.row_count,
            n_cols: self.column_count,
            max_missing_share: self.details.max_missing_share,
            numeric_cols: self.numeric_column_count(),
            categorical_cols: self.categorical_column_count(),
        }
    }

    /// Flags in the aggregated-metrics shape.
    pub fn metric_flags(&self) -> MetricFlags {
        MetricFlags {
            too_few_rows: self.flags.too_few_rows,
            too_many_columns: self.flags.too_many_columns,
            too_many_missing: self.flags.too_many_missing,
            no_numeric_columns: self.numeric_column_count() == 0,
            no_categorical_columns: self.categorical_column_count() == 0,
        }
    }

    /// Verdict based on the full score of this report.
    pub fn assessment(&self, config: &QualityConfig) -> MetricsAssessment {
        MetricsAssessment::new(self.quality_score, self.metric_flags(), config)
    }

    /// One printable row per column.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.columns.iter().map(ColumnProfile::summary_row).collect()
    }
}

/// The main profiling engine.
pub struct Profiler {
    config: ProfilerConfig,
    parser: Parser,
}

impl Profiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Load and profile a data file.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        self.config.validate()?;
        let (table, source) = self.parser.parse_file(path)?;
        let report = self.analyze_table(&table)?;
        Ok(AnalysisResult { source, report })
    }

    /// Decode and profile raw file contents.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<DatasetReport> {
        self.config.validate()?;
        let table = self.parser.parse_bytes(bytes)?;
        self.analyze_table(&table)
    }

    /// Profile an already loaded table.
    pub fn analyze_table(&self, table: &DataTable) -> Result<DatasetReport> {
        self.config.validate()?;

        if table.column_count() == 0 {
            return Err(EdaError::Schema("Dataset has no columns".to_string()));
        }
        if table.row_count() == 0 {
            return Err(EdaError::Schema("Dataset has no rows".to_string()));
        }

        debug!("profiling columns");
        let columns = ColumnProfiler::new().profile_table(table);

        debug!("analyzing missing values");
        let missingness = MissingnessAnalyzer::new().analyze(table);

        debug!("computing correlations");
        let correlation = CorrelationComputer::new().compute(table);

        debug!("counting categories");
        let mut categories = CategoryProfiler::new(self.config.top_k)?;
        if let Some(max) = self.config.max_category_columns {
            categories = categories.with_max_columns(max);
        }
        let top_categories = categories.profile(table);

        let evaluation =
            QualityFlagEvaluator::new(self.config.quality.clone()).evaluate(&columns, &missingness);
        let inputs = ScoreInputs::from_details(&evaluation.details);
        let quality_score =
            QualityScorer::new(self.config.weights.clone()).score(&evaluation.flags, &inputs);

        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            score = quality_score,
            "dataset profiled"
        );

        Ok(DatasetReport {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns,
            missingness,
            correlation,
            top_categories,
            flags: evaluation.flags,
            details: evaluation.details,
            quality_score,
        })
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
