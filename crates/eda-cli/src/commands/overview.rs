//! Overview command - print dataset size and a per-column summary.

use colored::Colorize;
use eda::{Profiler, ProfilerConfig, SummaryRow};

use crate::cli::InputArgs;

use super::{ensure_exists, parser_config};

pub fn run(input: InputArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&input)?;

    let config = ProfilerConfig::default().with_parser(parser_config(&input)?);
    let result = Profiler::with_config(config).analyze(&input.file)?;
    let report = &result.report;

    println!(
        "{} {}",
        "Overview of".cyan().bold(),
        input.file.display().to_string().white()
    );
    println!(
        "Rows: {}, columns: {}",
        report.row_count.to_string().white().bold(),
        report.column_count.to_string().white().bold()
    );
    if verbose {
        println!(
            "Format: {}, encoding: {}, {}",
            result.source.format, result.source.encoding, result.source.hash
        );
    }
    println!();

    println!("{}", header_line().yellow().bold());
    for row in report.summary_rows() {
        println!("{}", row_line(&row));
    }

    Ok(())
}

fn header_line() -> String {
    format!(
        "{:<20} {:<11} {:>8} {:>7} {:>7} {:>7} {:<5} {:>6} {:>10} {:>10} {:>10} {:>10}  {}",
        "name",
        "kind",
        "non_miss",
        "missing",
        "share",
        "unique",
        "const",
        "zeros",
        "min",
        "max",
        "mean",
        "std",
        "examples"
    )
}

fn row_line(row: &SummaryRow) -> String {
    format!(
        "{:<20} {:<11} {:>8} {:>7} {:>7.3} {:>7} {:<5} {:>6} {:>10} {:>10} {:>10} {:>10}  {}",
        row.name,
        row.kind,
        row.non_missing,
        row.missing,
        row.missing_share,
        row.unique,
        row.is_constant,
        optional(row.zero_share, 2),
        optional(row.min, 3),
        optional(row.max, 3),
        optional(row.mean, 3),
        optional(row.std, 3),
        row.example_values
    )
}

/// Fixed-precision number, or `-` when the statistic does not apply.
fn optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}
