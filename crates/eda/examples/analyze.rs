//! Example: profile a CSV file and print its quality verdict.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>

use std::env;
use std::path::Path;

use eda::{ColumnKind, Profiler, QualityConfig};

fn main() -> eda::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Profile: {}", path.display());
    println!("{}", separator);
    println!();

    let result = Profiler::new().analyze(path)?;
    let report = &result.report;

    println!("## Source");
    println!("  File: {}", result.source.file);
    println!("  Format: {}", result.source.format);
    println!("  Rows: {}", report.row_count);
    println!("  Columns: {}", report.column_count);
    println!();

    println!("## Columns");
    for col in &report.columns {
        let stats = match &col.kind {
            ColumnKind::Numeric(n) => format!("min={} max={} mean={:.3}", n.min, n.max, n.mean),
            ColumnKind::Categorical => String::new(),
        };
        println!(
            "  {:20} {:12} missing={:<6.3} unique={:<6} {}",
            col.name,
            col.kind.name(),
            col.missing_share,
            col.unique_count,
            stats
        );
    }
    println!();

    println!("## Quality");
    for (name, raised) in report.flags.entries() {
        println!("  {:36} {}", name, raised);
    }
    let assessment = report.assessment(&QualityConfig::default());
    println!("  Score: {:.2}", report.quality_score);
    println!("  {}", assessment.message);
    println!();

    println!("{}", separator);

    Ok(())
}
