//! Report directory writer: markdown, CSV tables and PNG charts.

mod charts;
mod markdown;
mod tables;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use eda::{DataTable, DatasetReport, QualityConfig};
use tracing::debug;

use markdown::MarkdownContext;
use tables::unique_stem;

pub type ReportResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Rendering options of a report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub max_hist_columns: usize,
    pub top_k: usize,
    /// Columns above this missing share are listed in `report.md`.
    pub min_missing_share: f64,
    /// Thresholds the report was computed with.
    pub quality: QualityConfig,
}

/// Paths written by [`ReportWriter::write`].
#[derive(Debug, Default)]
pub struct ReportArtifacts {
    pub markdown: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Writes every report artifact into one directory.
pub struct ReportWriter {
    out_dir: PathBuf,
    options: ReportOptions,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>, options: ReportOptions) -> Self {
        Self {
            out_dir: out_dir.into(),
            options,
        }
    }

    pub fn write(
        &self,
        source_file: &str,
        table: &DataTable,
        report: &DatasetReport,
    ) -> ReportResult<ReportArtifacts> {
        fs::create_dir_all(&self.out_dir)?;
        let mut artifacts = ReportArtifacts::default();

        let summary = self.out_dir.join("summary.csv");
        tables::write_summary(&summary, report)?;
        artifacts.files.push(summary);

        let missing = self.out_dir.join("missing.csv");
        tables::write_missing(&missing, &report.missingness)?;
        artifacts.files.push(missing);

        let matrix_png = self.out_dir.join("missing_matrix.png");
        charts::missing_matrix(&matrix_png, table)?;
        artifacts.files.push(matrix_png);

        if let Some(matrix) = &report.correlation {
            let csv_path = self.out_dir.join("correlation.csv");
            tables::write_correlation(&csv_path, matrix)?;
            artifacts.files.push(csv_path);

            let heatmap = self.out_dir.join("correlation_heatmap.png");
            charts::correlation_heatmap(&heatmap, matrix)?;
            artifacts.files.push(heatmap);
        }

        let top_dir = self.out_dir.join("top_categories");
        artifacts
            .files
            .extend(tables::write_top_categories(&top_dir, &report.top_categories)?);

        let histograms = self.write_histograms(table, report)?;
        artifacts
            .files
            .extend(histograms.iter().map(|name| self.out_dir.join(name)));

        let md = markdown::render(&MarkdownContext {
            source_file,
            report,
            options: &self.options,
            histograms: &histograms,
        });
        artifacts.markdown = self.out_dir.join("report.md");
        fs::write(&artifacts.markdown, md)?;

        debug!(
            out_dir = %self.out_dir.display(),
            files = artifacts.files.len() + 1,
            "report written"
        );
        Ok(artifacts)
    }

    /// Histograms for the first numeric columns; returns their file names.
    fn write_histograms(&self, table: &DataTable, report: &DatasetReport) -> ReportResult<Vec<String>> {
        let mut used = HashSet::new();
        let mut names = Vec::new();

        for column in report
            .columns
            .iter()
            .filter(|c| c.is_numeric())
            .take(self.options.max_hist_columns)
        {
            let values = numeric_values(table, column.position);
            let name = format!("hist_{}.png", unique_stem(&column.name, &mut used));
            charts::histogram(&self.out_dir.join(&name), &values)?;
            names.push(name);
        }
        Ok(names)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

fn numeric_values(table: &DataTable, index: usize) -> Vec<f64> {
    table
        .column_values(index)
        .filter(|v| !DataTable::is_missing(v))
        .filter_map(|v| v.trim().parse::<f64>().ok())
        .collect()
}
