//! Report command - profile a file and write a report directory.

use colored::Colorize;
use eda::{Parser, Profiler, ProfilerConfig, QualityConfig};

use crate::cli::{InputArgs, ReportArgs};
use crate::report::{ReportOptions, ReportWriter};

use super::{ensure_exists, parser_config};

pub fn run(
    input: InputArgs,
    options: ReportArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&input)?;

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        input.file.display().to_string().white()
    );

    let quality = QualityConfig::default()
        .with_high_cardinality_threshold(options.high_cardinality_threshold)
        .with_zero_share_threshold(options.zero_share_threshold)
        .with_missing_share_threshold(options.missing_share_threshold);
    let config = ProfilerConfig::default()
        .with_parser(parser_config(&input)?)
        .with_quality(quality.clone())
        .with_top_k(options.top_k_categories);
    config.validate()?;

    let (table, source) = Parser::with_config(config.parser.clone()).parse_file(&input.file)?;
    let report = Profiler::with_config(config).analyze_table(&table)?;

    let writer = ReportWriter::new(
        &options.out_dir,
        ReportOptions {
            title: options.title,
            max_hist_columns: options.max_hist_columns,
            top_k: options.top_k_categories,
            min_missing_share: options.min_missing_share,
            quality: quality.clone(),
        },
    );
    let artifacts = writer.write(&source.file, &table, &report)?;

    if verbose {
        println!();
        println!(
            "{} {}",
            "Files in".yellow().bold(),
            writer.out_dir().display()
        );
        for path in &artifacts.files {
            println!("  {}", path.display());
        }
    }

    println!();
    println!(
        "Quality score: {}",
        format!("{:.2}", report.quality_score).white().bold()
    );
    let assessment = report.assessment(&quality);
    if assessment.ok_for_model {
        println!("{}", assessment.message.green());
    } else {
        println!("{}", assessment.message.red());
    }
    println!(
        "{} {}",
        "Report written to".green().bold(),
        artifacts.markdown.display().to_string().white()
    );

    Ok(())
}
