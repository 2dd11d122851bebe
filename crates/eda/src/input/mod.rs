//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, parse_separator};
pub use source::{DataTable, SourceMetadata};
