//! Pairwise Pearson correlation between numeric columns.

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

use super::numeric_cells;

/// Minimum number of complete observations for a defined coefficient.
const MIN_PAIRS: usize = 2;

/// Square, symmetric correlation matrix over numeric columns.
///
/// A `None` cell is undefined: too few complete pairs, or zero variance on
/// either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Numeric column names, in table order.
    pub columns: Vec<String>,
    /// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Number of columns (and rows) in the matrix.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between two columns by name. `None` if either name is
    /// unknown or the cell is undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Computes a [`CorrelationMatrix`] using pairwise-complete observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationComputer;

impl CorrelationComputer {
    pub fn new() -> Self {
        Self
    }

    /// Correlate all numeric columns. Returns `None` with fewer than two.
    pub fn compute(&self, table: &DataTable) -> Option<CorrelationMatrix> {
        let (columns, cells): (Vec<String>, Vec<Vec<Option<f64>>>) = (0..table.column_count())
            .filter_map(|index| {
                numeric_cells(table, index).map(|cells| (table.headers[index].clone(), cells))
            })
            .unzip();

        if columns.len() < 2 {
            return None;
        }

        let n = columns.len();
        let mut values = vec![vec![None; n]; n];

        for i in 0..n {
            let present: Vec<f64> = cells[i].iter().flatten().copied().collect();
            values[i][i] = (!is_constant(&present)).then_some(1.0);

            for j in (i + 1)..n {
                let coefficient = pearson(&cells[i], &cells[j]);
                values[i][j] = coefficient;
                values[j][i] = coefficient;
            }
        }

        Some(CorrelationMatrix { columns, values })
    }
}

/// True for fewer than two values or when all values are equal.
fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Pearson coefficient over rows where both sides are present.
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if xs.len() < MIN_PAIRS || is_constant(&xs) || is_constant(&ys) {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in xs.iter().zip(ys.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
