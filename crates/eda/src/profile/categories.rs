//! Top-k value frequencies for categorical columns.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EdaError, Result};
use crate::input::DataTable;

use super::{numeric_cells, share};

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    /// count / non-missing values of the column.
    pub share: f64,
}

/// Frequency tables keyed by categorical column name, in column order.
pub type TopCategories = IndexMap<String, Vec<CategoryCount>>;

/// Builds top-k frequency tables.
#[derive(Debug, Clone)]
pub struct CategoryProfiler {
    top_k: usize,
    max_columns: Option<usize>,
}

impl CategoryProfiler {
    /// Create a profiler keeping the `top_k` most frequent values per column.
    pub fn new(top_k: usize) -> Result<Self> {
        if top_k < 1 {
            return Err(EdaError::Validation(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            top_k,
            max_columns: None,
        })
    }

    /// Report at most `max_columns` categorical columns (the first ones).
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = Some(max_columns);
        self
    }

    /// Count values of every categorical column.
    ///
    /// Ordering is by count descending, then value ascending, so equal
    /// inputs always produce equal tables. Missing values are not counted.
    pub fn profile(&self, table: &DataTable) -> TopCategories {
        let limit = self.max_columns.unwrap_or(usize::MAX);

        (0..table.column_count())
            .filter(|&index| numeric_cells(table, index).is_none())
            .take(limit)
            .map(|index| (table.headers[index].clone(), self.count_column(table, index)))
            .collect()
    }

    fn count_column(&self, table: &DataTable, index: usize) -> Vec<CategoryCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0;

        for value in table.column_values(index) {
            if DataTable::is_missing(value) {
                continue;
            }
            *counts.entry(value).or_insert(0) += 1;
            total += 1;
        }

        let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(self.top_k);

        entries
            .into_iter()
            .map(|(value, count)| CategoryCount {
                value: value.to_string(),
                count,
                share: share(count, total),
            })
            .collect()
    }
}
