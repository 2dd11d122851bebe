//! EDA: exploratory profiling and data-quality scoring for tabular datasets.
//!
//! A CSV file is loaded into an in-memory [`DataTable`], profiled column by
//! column, and reduced to a set of boolean quality flags plus a single
//! quality score in `[0, 1]`.
//!
//! # Core Principles
//!
//! - **Pure analysis**: every analyzer is a function of its input table
//! - **Deterministic**: equal inputs always produce equal reports
//! - **Non-destructive**: the source file is never modified
//!
//! # Example
//!
//! ```no_run
//! use eda::Profiler;
//!
//! let result = Profiler::new().analyze("data.csv").unwrap();
//!
//! println!("Rows: {}", result.report.row_count);
//! println!("Quality score: {:.2}", result.report.quality_score);
//! ```

pub mod error;
pub mod input;
pub mod profile;
pub mod quality;
pub mod schema;

mod profiler;

pub use crate::profiler::{AnalysisResult, DatasetReport, Profiler, ProfilerConfig};
pub use error::{EdaError, ErrorKind, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use profile::{CategoryCount, CorrelationMatrix, MissingEntry, MissingnessTable, TopCategories};
pub use quality::{
    DatasetMetrics, MetricFlags, MetricsAssessment, QualityConfig, QualityDetails, QualityFlags,
    ScoreWeights, assess_metrics,
};
pub use schema::{ColumnKind, ColumnProfile, NumericSummary, SummaryRow};
