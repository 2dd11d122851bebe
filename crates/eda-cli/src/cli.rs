//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EDA: dataset profiling and data-quality scoring
#[derive(Parser)]
#[command(name = "eda")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command that reads a CSV file.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the CSV file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Column separator (single character, "\t" or "tab")
    #[arg(long, default_value = ",")]
    pub sep: String,

    /// Text encoding of the file
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a short overview of a dataset
    Overview {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write a full EDA report with tables and charts
    Report {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        options: ReportArgs,
    },

    /// Run the HTTP quality service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}

/// Options of the `report` command.
#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory the report is written to
    #[arg(long, default_value = "reports")]
    pub out_dir: PathBuf,

    /// Maximum number of numeric columns to draw histograms for
    #[arg(long, default_value = "6")]
    pub max_hist_columns: usize,

    /// Values kept per categorical column
    #[arg(long, default_value = "5")]
    pub top_k_categories: usize,

    /// Report title
    #[arg(long, default_value = "EDA-отчёт")]
    pub title: String,

    /// Columns with a larger missing share are listed as problematic
    #[arg(long, default_value = "0.1")]
    pub min_missing_share: f64,

    /// Categorical columns with more unique values are high-cardinality
    #[arg(long, default_value = "50")]
    pub high_cardinality_threshold: usize,

    /// Numeric columns with a larger share of zeros are zero-heavy
    #[arg(long, default_value = "0.5")]
    pub zero_share_threshold: f64,

    /// Datasets with a larger maximum missing share are flagged
    #[arg(long, default_value = "0.5")]
    pub missing_share_threshold: f64,
}
