//! CSV artifacts of a report.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use eda::{CorrelationMatrix, DatasetReport, MissingnessTable, TopCategories};

use super::ReportResult;

/// Write one row per column profile.
pub fn write_summary(path: &Path, report: &DatasetReport) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in report.summary_rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_missing(path: &Path, missingness: &MissingnessTable) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["column", "missing_count", "missing_share"])?;
    for (name, entry) in &missingness.columns {
        writer.write_record([
            name.clone(),
            entry.missing_count.to_string(),
            entry.missing_share.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Square matrix with a leading name column. Undefined cells are empty.
pub fn write_correlation(path: &Path, matrix: &CorrelationMatrix) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![String::new()];
    header.extend(matrix.columns.iter().cloned());
    writer.write_record(&header)?;

    for (name, values) in matrix.columns.iter().zip(&matrix.values) {
        let mut record = vec![name.clone()];
        record.extend(values.iter().map(|v| v.map(|r| r.to_string()).unwrap_or_default()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// One `<column>.csv` per categorical column inside `dir`.
pub fn write_top_categories(dir: &Path, top: &TopCategories) -> ReportResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut used = HashSet::new();
    let mut written = Vec::with_capacity(top.len());
    for (name, counts) in top {
        let path = dir.join(format!("{}.csv", unique_stem(name, &mut used)));
        let mut writer = csv::Writer::from_path(&path)?;
        for count in counts {
            writer.serialize(count)?;
        }
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

/// Column name made safe for a file name.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "column".to_string()
    } else {
        cleaned
    }
}

/// Sanitized name, suffixed when an earlier column already took it.
pub fn unique_stem(name: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_file_name(name);
    let mut stem = base.clone();
    let mut n = 1;
    while !used.insert(stem.clone()) {
        stem = format!("{}_{}", base, n);
        n += 1;
    }
    stem
}
