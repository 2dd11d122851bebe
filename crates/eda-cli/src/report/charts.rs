//! PNG charts drawn with plotters.
//!
//! Only shapes are drawn, so no font stack is needed at build or run time.

use std::path::Path;

use eda::{CorrelationMatrix, DataTable};
use plotters::prelude::*;

use super::ReportResult;

/// Number of histogram bins.
pub const HIST_BINS: usize = 10;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const MARGIN: i32 = 20;

const BAR: RGBColor = RGBColor(70, 110, 180);
const PRESENT: RGBColor = RGBColor(235, 235, 235);
const MISSING: RGBColor = RGBColor(40, 40, 40);
const UNDEFINED: RGBColor = RGBColor(190, 190, 190);

/// Count values into `bins` equal-width bins between min and max. A
/// single-valued input lands in the middle bin.
pub fn bin_counts(values: &[f64], bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if values.is_empty() || bins == 0 {
        return counts;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = max - min;

    for &v in values {
        let index = if width > 0.0 {
            (((v - min) / width) * bins as f64).floor() as usize
        } else {
            bins / 2
        };
        counts[index.min(bins - 1)] += 1;
    }
    counts
}

/// Histogram of one numeric column.
pub fn histogram(path: &Path, values: &[f64]) -> ReportResult<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let counts = bin_counts(values, HIST_BINS);
    let highest = counts.iter().copied().max().unwrap_or(0).max(1);

    let plot_w = WIDTH as i32 - 2 * MARGIN;
    let plot_h = HEIGHT as i32 - 2 * MARGIN;
    let bottom = MARGIN + plot_h;
    let bar_w = plot_w / HIST_BINS as i32;

    for (i, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x0 = MARGIN + i as i32 * bar_w;
        let top = bottom - (count as i64 * plot_h as i64 / highest as i64) as i32;
        root.draw(&Rectangle::new([(x0, top), (x0 + bar_w, bottom)], BAR.filled()))?;
        root.draw(&Rectangle::new([(x0, top), (x0 + bar_w, bottom)], &BLACK))?;
    }
    root.draw(&PathElement::new(
        vec![(MARGIN, bottom), (MARGIN + plot_w, bottom)],
        &BLACK,
    ))?;

    root.present()?;
    Ok(())
}

/// Rows × columns grid with missing cells dark.
pub fn missing_matrix(path: &Path, table: &DataTable) -> ReportResult<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let rows = table.row_count().max(1) as i64;
    let cols = table.column_count().max(1) as i64;
    let plot_w = (WIDTH as i32 - 2 * MARGIN) as i64;
    let plot_h = (HEIGHT as i32 - 2 * MARGIN) as i64;

    root.draw(&Rectangle::new(
        [(MARGIN, MARGIN), (MARGIN + plot_w as i32, MARGIN + plot_h as i32)],
        PRESENT.filled(),
    ))?;

    for (r, row) in table.rows.iter().enumerate() {
        let y0 = MARGIN + (r as i64 * plot_h / rows) as i32;
        let y1 = (MARGIN + ((r as i64 + 1) * plot_h / rows) as i32).max(y0 + 1);

        for (c, value) in row.iter().enumerate() {
            if !DataTable::is_missing(value) {
                continue;
            }
            let x0 = MARGIN + (c as i64 * plot_w / cols) as i32;
            let x1 = MARGIN + ((c as i64 + 1) * plot_w / cols) as i32;
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], MISSING.filled()))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Cell color: red for positive, blue for negative, grey when undefined.
pub fn heat_color(value: Option<f64>) -> RGBColor {
    match value {
        None => UNDEFINED,
        Some(v) => {
            let v = v.clamp(-1.0, 1.0);
            let fade = (255.0 * (1.0 - v.abs())).round() as u8;
            if v >= 0.0 {
                RGBColor(255, fade, fade)
            } else {
                RGBColor(fade, fade, 255)
            }
        }
    }
}

/// Correlation matrix as a colored grid.
pub fn correlation_heatmap(path: &Path, matrix: &CorrelationMatrix) -> ReportResult<()> {
    let root = BitMapBackend::new(path, (WIDTH, WIDTH)).into_drawing_area();
    root.fill(&WHITE)?;

    let n = matrix.len().max(1) as i32;
    let cell = (WIDTH as i32 - 2 * MARGIN) / n;

    for (i, row) in matrix.values.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            let x0 = MARGIN + j as i32 * cell;
            let y0 = MARGIN + i as i32 * cell;
            let corners = [(x0, y0), (x0 + cell, y0 + cell)];
            root.draw(&Rectangle::new(corners, heat_color(*value).filled()))?;
            root.draw(&Rectangle::new(corners, &WHITE))?;
        }
    }

    root.present()?;
    Ok(())
}
