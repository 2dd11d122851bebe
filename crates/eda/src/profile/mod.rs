//! Profile fragments computed independently from a loaded table.
//!
//! Each analyzer is a pure function of its input table: nothing is cached and
//! no state survives between calls.

mod categories;
mod column;
mod correlation;
mod missing;

pub use categories::{CategoryCount, CategoryProfiler, TopCategories};
pub use column::ColumnProfiler;
pub use correlation::{CorrelationComputer, CorrelationMatrix};
pub use missing::{MissingEntry, MissingnessAnalyzer, MissingnessTable};

use crate::input::DataTable;

/// Parse a cell as a finite number.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Cells of a column as numbers, aligned with rows (`None` = missing).
///
/// Returns `None` when the column is not numeric: it has no non-missing
/// value, or some non-missing value is not a finite number.
pub(crate) fn numeric_cells(table: &DataTable, index: usize) -> Option<Vec<Option<f64>>> {
    let mut cells = Vec::with_capacity(table.row_count());
    let mut seen_value = false;

    for value in table.column_values(index) {
        if DataTable::is_missing(value) {
            cells.push(None);
            continue;
        }
        cells.push(Some(parse_number(value)?));
        seen_value = true;
    }

    seen_value.then_some(cells)
}

/// missing / rows, defined as 0 for an empty table.
pub(crate) fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
