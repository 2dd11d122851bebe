//! Property-based tests for the profiling engine.
//!
//! These tests use proptest to generate random tables and verify that the
//! analyzers keep their invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p eda --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p eda --test property_tests
//! ```

use proptest::prelude::*;

use eda::profile::{CategoryProfiler, CorrelationComputer};
use eda::quality::{QualityFlags, QualityScorer, ScoreInputs};
use eda::{DataTable, Parser, Profiler};

// =============================================================================
// Test Strategies
// =============================================================================

/// A single cell: mostly small numbers, some words, some missing tokens.
fn cell() -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        4 => (-50i32..50).prop_map(|v| v.to_string()),
        2 => "[a-e]{1,2}",
        1 => Just(String::new()),
        1 => Just("NA".to_string()),
    ]
}

fn numeric_cell() -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        6 => (-1000.0f64..1000.0).prop_map(|v| format!("{v:.3}")),
        1 => Just(String::new()),
    ]
}

/// A rectangular table with 1..6 columns and 1..40 rows.
fn table(cells: impl Strategy<Value = String> + Clone) -> impl Strategy<Value = DataTable> {
    (1usize..6, 1usize..40).prop_flat_map(move |(cols, rows)| {
        prop::collection::vec(prop::collection::vec(cells.clone(), cols), rows).prop_map(
            move |rows| {
                let headers = (0..cols).map(|i| format!("col{i}")).collect();
                DataTable::new(headers, rows, b',')
            },
        )
    })
}

fn flags() -> impl Strategy<Value = QualityFlags> {
    prop::array::uniform6(any::<bool>()).prop_map(|b| QualityFlags {
        too_few_rows: b[0],
        too_many_columns: b[1],
        too_many_missing: b[2],
        has_constant_columns: b[3],
        has_high_cardinality_categoricals: b[4],
        has_many_zero_values: b[5],
    })
}

// =============================================================================
// Score Properties
// =============================================================================

proptest! {
    #[test]
    fn score_is_always_in_unit_interval(
        flags in flags(),
        max_missing_share in 0.0f64..=1.0,
        constant_columns in 0usize..200,
        high_cardinality_columns in 0usize..200,
        zero_heavy_columns in 0usize..200,
    ) {
        let inputs = ScoreInputs {
            max_missing_share,
            constant_columns,
            high_cardinality_columns,
            zero_heavy_columns,
        };
        let score = QualityScorer::default().score(&flags, &inputs);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn report_score_is_in_unit_interval(table in table(cell())) {
        let report = Profiler::new().analyze_table(&table).unwrap();
        prop_assert!((0.0..=1.0).contains(&report.quality_score));
        prop_assert!((0.0..=1.0).contains(&report.details.max_missing_share));
    }
}

// =============================================================================
// Profile Properties
// =============================================================================

proptest! {
    #[test]
    fn missing_and_non_missing_add_up(table in table(cell())) {
        let report = Profiler::new().analyze_table(&table).unwrap();
        for column in &report.columns {
            prop_assert_eq!(column.missing_count + column.non_missing_count, report.row_count);
            prop_assert!(column.unique_count <= column.non_missing_count);
            if column.non_missing_count == 0 {
                prop_assert!(!column.is_constant);
            }
        }
    }

    #[test]
    fn correlation_is_symmetric_and_bounded(table in table(numeric_cell())) {
        if let Some(matrix) = CorrelationComputer::new().compute(&table) {
            for i in 0..matrix.len() {
                for j in 0..matrix.len() {
                    prop_assert_eq!(matrix.values[i][j], matrix.values[j][i]);
                    if let Some(r) = matrix.values[i][j] {
                        prop_assert!((-1.0..=1.0).contains(&r));
                    }
                }
                if let Some(r) = matrix.values[i][i] {
                    prop_assert_eq!(r, 1.0);
                }
            }
        }
    }

    #[test]
    fn top_categories_are_bounded_and_sorted(table in table(cell()), k in 1usize..8) {
        let top = CategoryProfiler::new(k).unwrap().profile(&table);
        let report = Profiler::new().analyze_table(&table).unwrap();

        for (name, counts) in &top {
            let unique = report.column(name).unwrap().unique_count;
            prop_assert!(counts.len() <= k.min(unique));
            for pair in counts.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }
    }

    #[test]
    fn analysis_is_deterministic(table in table(cell())) {
        let profiler = Profiler::new();
        let first = profiler.analyze_table(&table).unwrap();
        let second = profiler.analyze_table(&table).unwrap();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Parser Properties
// =============================================================================

proptest! {
    #[test]
    fn parser_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Parser::new().parse_bytes(&bytes);
    }

    #[test]
    fn parsed_rows_match_header_width(text in "[a-c0-9,\n]{0,200}") {
        if let Ok(table) = Parser::new().parse_bytes(text.as_bytes()) {
            for row in &table.rows {
                prop_assert_eq!(row.len(), table.column_count());
            }
        }
    }
}
