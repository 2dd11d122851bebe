//! Missing-value analysis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::DataTable;

use super::share;

/// Missing-value counts for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub missing_count: usize,
    /// missing_count / row_count, or 0 for an empty table.
    pub missing_share: f64,
}

/// Per-column missingness plus the worst column share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingnessTable {
    /// Number of rows the shares are relative to.
    pub row_count: usize,
    /// Entries in column order.
    pub columns: IndexMap<String, MissingEntry>,
    /// Max of `missing_share` over columns (0 with no columns).
    pub max_missing_share: f64,
}

impl MissingnessTable {
    /// Get the entry for a column.
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.columns.get(column)
    }

    /// Columns whose missing share is strictly above `threshold`, in column order.
    pub fn columns_above(&self, threshold: f64) -> Vec<(&str, f64)> {
        self.columns
            .iter()
            .filter(|(_, entry)| entry.missing_share > threshold)
            .map(|(name, entry)| (name.as_str(), entry.missing_share))
            .collect()
    }

    /// Total number of missing cells.
    pub fn total_missing(&self) -> usize {
        self.columns.values().map(|e| e.missing_count).sum()
    }
}

/// Computes a [`MissingnessTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingnessAnalyzer;

impl MissingnessAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Count missing cells in every column.
    pub fn analyze(&self, table: &DataTable) -> MissingnessTable {
        let row_count = table.row_count();
        let mut columns = IndexMap::with_capacity(table.column_count());
        let mut max_missing_share: f64 = 0.0;

        for (index, name) in table.headers.iter().enumerate() {
            let missing_count = table
                .column_values(index)
                .filter(|v| DataTable::is_missing(v))
                .count();
            let missing_share = share(missing_count, row_count);
            max_missing_share = max_missing_share.max(missing_share);

            columns.insert(
                name.clone(),
                MissingEntry {
                    missing_count,
                    missing_share,
                },
            );
        }

        MissingnessTable {
            row_count,
            columns,
            max_missing_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_counts() {
        let table = DataTable::from_columns(vec![
            ("age", vec!["10", "20", "30", ""]),
            ("height", vec!["140", "150", "160", "170"]),
            ("city", vec!["A", "NA", "A", ""]),
        ]);
        let missing = MissingnessAnalyzer::new().analyze(&table);

        assert_eq!(missing.get("age").unwrap().missing_count, 1);
        assert_eq!(missing.get("height").unwrap().missing_share, 0.0);
        assert_eq!(missing.get("city").unwrap().missing_share, 0.5);
        assert_eq!(missing.max_missing_share, 0.5);
        assert_eq!(missing.total_missing(), 3);
    }

    #[test]
    fn test_columns_above_is_exclusive() {
        let table = DataTable::from_columns(vec![
            ("half", vec!["", "1"]),
            ("none", vec!["1", "1"]),
            ("all", vec!["", ""]),
        ]);
        let missing = MissingnessAnalyzer::new().analyze(&table);

        let above: Vec<&str> = missing.columns_above(0.5).into_iter().map(|(n, _)| n).collect();
        assert_eq!(above, vec!["all"]);
    }

    #[test]
    fn test_empty_table() {
        let table = DataTable::new(vec!["a".into()], Vec::new(), b',');
        let missing = MissingnessAnalyzer::new().analyze(&table);

        assert_eq!(missing.get("a").unwrap().missing_share, 0.0);
        assert_eq!(missing.max_missing_share, 0.0);
    }

    #[test]
    fn test_no_columns() {
        let table = DataTable::new(Vec::new(), Vec::new(), b',');
        let missing = MissingnessAnalyzer::new().analyze(&table);
        assert!(missing.columns.is_empty());
        assert_eq!(missing.max_missing_share, 0.0);
    }
}
