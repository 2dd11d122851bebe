//! CLI command implementations.

pub mod overview;
pub mod report;
pub mod serve;

use eda::ParserConfig;

use crate::cli::InputArgs;

/// Parser settings from the shared input flags.
pub fn parser_config(input: &InputArgs) -> eda::Result<ParserConfig> {
    ParserConfig::default()
        .with_encoding(input.encoding.as_str())
        .with_separator(&input.sep)
}

/// Check the input file exists before handing it to the profiler.
pub fn ensure_exists(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !input.file.exists() {
        return Err(format!("File not found: {}", input.file.display()).into());
    }
    Ok(())
}
