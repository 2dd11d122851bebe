//! CSV/TSV parser with delimiter detection and encoding support.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{DataTable, SourceMetadata};
use crate::error::{EdaError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Encoding label understood by the WHATWG encoding standard.
    pub encoding: String,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: "utf-8".to_string(),
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Use a fixed delimiter instead of auto-detection.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Use a fixed delimiter given as user text (`","`, `";"`, `"\t"`, `"tab"`).
    pub fn with_separator(self, separator: &str) -> Result<Self> {
        Ok(self.with_delimiter(parse_separator(separator)?))
    }

    /// Decode input with the given encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Resolve the configured encoding label.
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            EdaError::Validation(format!("Unsupported encoding: {}", self.encoding))
        })
    }

    /// Check the configuration without reading anything.
    pub fn validate(&self) -> Result<()> {
        self.resolve_encoding()?;
        if let Some(d) = self.delimiter {
            if !d.is_ascii() || d == b'\n' || d == b'\r' || d == self.quote {
                return Err(EdaError::Validation(format!(
                    "Invalid separator: {:?}",
                    d as char
                )));
            }
        }
        Ok(())
    }
}

/// Parse a user-supplied separator into a single delimiter byte.
pub fn parse_separator(separator: &str) -> Result<u8> {
    match separator {
        "\\t" | "\t" | "tab" | "TAB" => return Ok(b'\t'),
        _ => {}
    }

    let mut chars = separator.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '\n' && c != '\r' && c != '"' => Ok(c as u8),
        _ => Err(EdaError::Validation(format!(
            "Separator must be a single ASCII character, got {:?}",
            separator
        ))),
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| EdaError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let data_table = self.parse_bytes(&contents)?;

        let format = match data_table.delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            self.config.resolve_encoding()?.name().to_lowercase(),
            data_table.row_count(),
            data_table.column_count(),
        );

        debug!(
            file = %source_metadata.file,
            rows = source_metadata.row_count,
            columns = source_metadata.column_count,
            "parsed input file"
        );

        Ok((data_table, source_metadata))
    }

    /// Decode and parse raw bytes (e.g. an uploaded file).
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        self.config.validate()?;
        let text = self.decode(bytes)?;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text.as_bytes())?,
        };

        self.parse_text(&text, delimiter)
    }

    /// Decode bytes with the configured encoding, stripping any BOM.
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        let encoding = self.config.resolve_encoding()?;
        let (text, used, had_errors) = encoding.decode(bytes);

        if had_errors {
            let offset = text.find('\u{FFFD}').unwrap_or(0);
            let line = text[..offset].matches('\n').count() + 1;
            return Err(EdaError::Parse {
                line,
                message: format!("input is not valid {}", used.name()),
            });
        }

        Ok(text.into_owned())
    }

    fn parse_text(&self, text: &str, delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            match records.first() {
                Some(record) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                None => return Err(EdaError::Schema("No data rows found".to_string())),
            }
        };

        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(EdaError::Schema("No columns found".to_string()));
        }
        let headers = dedupe_headers(headers);
        let expected_cols = headers.len();

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len());
        for record in records {
            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }
            // Short rows are padded with missing cells; extra fields are an error.
            if record.len() > expected_cols {
                return Err(EdaError::Parse {
                    line: record.position().map(|p| p.line() as usize).unwrap_or(0),
                    message: format!(
                        "expected {} fields, saw {}",
                        expected_cols,
                        record.len()
                    ),
                });
            }
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(expected_cols, String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(EdaError::Schema("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(headers.len());

    for header in headers {
        let mut candidate = header.clone();
        while let Some(n) = seen.get_mut(&candidate) {
            *n += 1;
            candidate = format!("{}.{}", header, n);
        }
        seen.insert(candidate.clone(), 0);
        result.push(candidate);
    }

    result
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(EdaError::Schema("Input is empty".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab is rare inside real values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
