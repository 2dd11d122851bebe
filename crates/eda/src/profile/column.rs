//! Per-column descriptive statistics and kind classification.

use std::collections::HashSet;

use crate::input::DataTable;
use crate::schema::{ColumnKind, ColumnProfile, NumericSummary};

use super::{numeric_cells, share};

/// Default number of example values kept per column.
const DEFAULT_EXAMPLE_COUNT: usize = 3;

// =============================================================================
// RUNNING STATISTICS
// =============================================================================

/// Single-pass accumulator using Welford's algorithm for mean and variance.
#[derive(Debug, Clone)]
struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
    zeros: usize,
}

impl RunningStats {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            zeros: 0,
        }
    }

    fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        if value == 0.0 {
            self.zeros += 1;
        }
    }

    /// Sample variance (n - 1).
    fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    fn to_summary(&self) -> NumericSummary {
        NumericSummary {
            zero_share: share(self.zeros, self.count),
            min: self.min,
            max: self.max,
            mean: self.mean,
            std: self.variance().sqrt(),
        }
    }
}

/// Normalise a float for distinct-value counting (`-0.0` equals `0.0`).
fn number_key(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

// =============================================================================
// PROFILER
// =============================================================================

/// Computes a [`ColumnProfile`] for every column of a table.
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    example_count: usize,
}

impl ColumnProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self {
            example_count: DEFAULT_EXAMPLE_COUNT,
        }
    }

    /// Profile every column, preserving input order.
    pub fn profile_table(&self, table: &DataTable) -> Vec<ColumnProfile> {
        (0..table.column_count())
            .map(|index| self.profile_column(table, index))
            .collect()
    }

    /// Profile a single column by index.
    pub fn profile_column(&self, table: &DataTable, index: usize) -> ColumnProfile {
        let row_count = table.row_count();
        let name = table.headers.get(index).cloned().unwrap_or_default();

        let mut missing_count = 0;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut example_values = Vec::new();

        for value in table.column_values(index) {
            if DataTable::is_missing(value) {
                missing_count += 1;
                continue;
            }
            if seen.insert(value) && example_values.len() < self.example_count {
                example_values.push(value.trim().to_string());
            }
        }

        let non_missing_count = row_count - missing_count;

        let (kind, unique_count) = match numeric_cells(table, index) {
            Some(cells) => {
                let mut stats = RunningStats::new();
                let mut distinct: HashSet<u64> = HashSet::new();
                for value in cells.into_iter().flatten() {
                    stats.add(value);
                    distinct.insert(number_key(value));
                }
                (ColumnKind::Numeric(stats.to_summary()), distinct.len())
            }
            None => (ColumnKind::Categorical, seen.len()),
        };

        ColumnProfile {
            name,
            position: index,
            kind,
            non_missing_count,
            missing_count,
            missing_share: share(missing_count, row_count),
            unique_count,
            is_constant: non_missing_count > 0 && unique_count <= 1,
            example_values,
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataTable {
        DataTable::from_columns(vec![
            ("age", vec!["10", "20", "30", ""]),
            ("height", vec!["140", "150", "160", "170"]),
            ("city", vec!["A", "B", "A", ""]),
        ])
    }

    #[test]
    fn test_profile_preserves_order_and_kinds() {
        let profiles = ColumnProfiler::new().profile_table(&sample_table());

        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["age", "height", "city"]);
        assert!(profiles[0].is_numeric());
        assert!(profiles[1].is_numeric());
        assert!(profiles[2].is_categorical());
    }

    #[test]
    fn test_missing_and_unique_counts() {
        let profiles = ColumnProfiler::new().profile_table(&sample_table());

        assert_eq!(profiles[0].missing_count, 1);
        assert_eq!(profiles[0].missing_share, 0.25);
        assert_eq!(profiles[0].unique_count, 3);
        assert_eq!(profiles[2].unique_count, 2);
        assert_eq!(profiles[2].example_values, vec!["A", "B"]);
    }

    #[test]
    fn test_numeric_summary() {
        let profiles = ColumnProfiler::new().profile_table(&sample_table());
        let age = profiles[0].kind.numeric().unwrap();

        assert_eq!(age.min, 10.0);
        assert_eq!(age.max, 30.0);
        assert!((age.mean - 20.0).abs() < 1e-12);
        assert!((age.std - 10.0).abs() < 1e-12);
        assert_eq!(age.zero_share, 0.0);
    }

    #[test]
    fn test_zero_share() {
        let table = DataTable::from_columns(vec![(
            "mostly_zeros",
            vec!["0", "0", "0", "0", "0", "0", "1", "2"],
        )]);
        let profile = ColumnProfiler::new().profile_column(&table, 0);
        assert_eq!(profile.zero_share(), Some(0.75));
    }

    #[test]
    fn test_numeric_uniqueness_by_value() {
        let table = DataTable::from_columns(vec![("x", vec!["1", "1.0", "-0", "0"])]);
        let profile = ColumnProfiler::new().profile_column(&table, 0);
        assert_eq!(profile.unique_count, 2);
    }

    #[test]
    fn test_constant_column() {
        let table = DataTable::from_columns(vec![
            ("constant", vec!["same", "same", "", "same"]),
            ("varying", vec!["a", "b", "c", "d"]),
        ]);
        let profiles = ColumnProfiler::new().profile_table(&table);
        assert!(profiles[0].is_constant);
        assert!(!profiles[1].is_constant);
    }

    #[test]
    fn test_all_missing_column_is_categorical_and_not_constant() {
        let table = DataTable::from_columns(vec![("empty", vec!["", "NA", "null"])]);
        let profile = ColumnProfiler::new().profile_column(&table, 0);

        assert!(profile.is_categorical());
        assert!(!profile.is_constant);
        assert_eq!(profile.unique_count, 0);
        assert_eq!(profile.missing_share, 1.0);
        assert_eq!(profile.zero_share(), None);
    }

    #[test]
    fn test_mixed_values_are_categorical() {
        let table = DataTable::from_columns(vec![("code", vec!["1", "2", "x3"])]);
        let profile = ColumnProfiler::new().profile_column(&table, 0);
        assert!(profile.is_categorical());
        assert_eq!(profile.unique_count, 3);
    }
}
