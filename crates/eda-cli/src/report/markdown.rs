//! `report.md` rendering.

use std::fmt::Write;

use eda::DatasetReport;

use super::ReportOptions;

/// Everything the markdown page refers to.
pub struct MarkdownContext<'a> {
    pub source_file: &'a str,
    pub report: &'a DatasetReport,
    pub options: &'a ReportOptions,
    /// File names of the histograms actually drawn.
    pub histograms: &'a [String],
}

pub fn render(ctx: &MarkdownContext<'_>) -> String {
    let mut md = String::new();
    write_page(&mut md, ctx).ok();
    md
}

fn write_page(md: &mut String, ctx: &MarkdownContext<'_>) -> std::fmt::Result {
    let report = ctx.report;
    let options = ctx.options;
    let quality = &options.quality;
    let details = &report.details;
    let flags = &report.flags;

    writeln!(md, "# {}\n", options.title)?;
    writeln!(md, "Source file: `{}`\n", ctx.source_file)?;
    writeln!(
        md,
        "Rows: **{}**, columns: **{}**\n",
        report.row_count, report.column_count
    )?;

    writeln!(md, "## Report parameters\n")?;
    writeln!(md, "- Max histograms: **{}**", options.max_hist_columns)?;
    writeln!(md, "- Top-K categories: **{}**", options.top_k)?;
    writeln!(
        md,
        "- Missing share threshold: **{}**\n",
        percent(options.min_missing_share, 0)
    )?;

    writeln!(md, "## Data quality (heuristics)\n")?;
    writeln!(md, "- Quality score: **{:.2}**", report.quality_score)?;
    writeln!(
        md,
        "- Max missing share per column: **{}**",
        percent(details.max_missing_share, 2)
    )?;
    writeln!(
        md,
        "- Too few rows (<{}): **{}**",
        quality.min_rows, flags.too_few_rows
    )?;
    writeln!(
        md,
        "- Too many columns (>{}): **{}**",
        quality.max_columns, flags.too_many_columns
    )?;
    writeln!(
        md,
        "- Too many missing values (>{}): **{}**",
        percent(quality.missing_share_threshold, 0),
        flags.too_many_missing
    )?;
    writeln!(
        md,
        "- Constant columns: **{}**{}",
        flags.has_constant_columns,
        column_list(&details.constant_columns)
    )?;
    writeln!(
        md,
        "- High-cardinality categoricals (>{}): **{}**{}",
        quality.high_cardinality_threshold,
        flags.has_high_cardinality_categoricals,
        column_list(&details.high_cardinality_columns)
    )?;
    writeln!(
        md,
        "- Zero-heavy columns (>{}): **{}**{}",
        percent(quality.zero_share_threshold, 0),
        flags.has_many_zero_values,
        column_list(&details.zero_heavy_columns)
    )?;
    writeln!(
        md,
        "- Max zero share: **{}**\n",
        percent(details.max_zero_share, 2)
    )?;

    writeln!(md, "## Columns\n")?;
    writeln!(md, "See `summary.csv`.\n")?;

    writeln!(md, "## Missing values\n")?;
    if report.missingness.total_missing() == 0 {
        writeln!(md, "No missing values.\n")?;
    } else {
        writeln!(md, "See `missing.csv` and `missing_matrix.png`.\n")?;
        let problems = report.missingness.columns_above(options.min_missing_share);
        if !problems.is_empty() {
            writeln!(
                md,
                "### Problem columns (missing share > {})\n",
                percent(options.min_missing_share, 0)
            )?;
            for (name, share) in problems {
                writeln!(md, "- `{}`: **{}** missing", name, percent(share, 2))?;
            }
            writeln!(md)?;
        }
    }

    writeln!(md, "## Correlation of numeric columns\n")?;
    if report.correlation.is_some() {
        writeln!(md, "See `correlation.csv` and `correlation_heatmap.png`.\n")?;
    } else {
        writeln!(md, "Not enough numeric columns for a correlation matrix.\n")?;
    }

    writeln!(md, "## Categorical columns\n")?;
    if report.top_categories.is_empty() {
        writeln!(md, "No categorical columns found.\n")?;
    } else {
        writeln!(md, "Top-{} values per column.\n", options.top_k)?;
        writeln!(md, "See the files in `top_categories/`.\n")?;
    }

    writeln!(md, "## Histograms of numeric columns\n")?;
    if ctx.histograms.is_empty() {
        writeln!(md, "No numeric columns to draw.")?;
    } else {
        writeln!(
            md,
            "Up to {} histograms drawn.\n",
            options.max_hist_columns
        )?;
        for name in ctx.histograms {
            writeln!(md, "![{}]({})", name, name)?;
        }
    }

    Ok(())
}

fn percent(share: f64, precision: usize) -> String {
    format!("{:.*}%", precision, share * 100.0)
}

fn column_list(columns: &[String]) -> String {
    if columns.is_empty() {
        String::new()
    } else {
        format!(" ({})", columns.join(", "))
    }
}
