//! Integration tests for the eda profiling engine.

use std::io::Write;
use tempfile::NamedTempFile;

use eda::{
    ColumnKind, DatasetMetrics, EdaError, ErrorKind, ParserConfig, Profiler, ProfilerConfig,
    QualityConfig, ScoreWeights, assess_metrics,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn create_test_file_bytes(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write to temp file");
    file
}

// =============================================================================
// Basic Functionality Tests
// =============================================================================

#[test]
fn test_analyze_basic_csv() {
    let content = "id,name,age,active\n\
                   1,Alice,30,true\n\
                   2,Bob,25,false\n\
                   3,Carol,28,true\n";
    let file = create_test_file(content);

    let result = Profiler::new().analyze(file.path()).expect("Analysis failed");

    assert_eq!(result.source.row_count, 3);
    assert_eq!(result.source.column_count, 4);
    assert_eq!(result.source.format, "csv");
    assert_eq!(result.report.columns.len(), 4);
    assert_eq!(result.report.numeric_column_count(), 2);
    assert_eq!(result.report.categorical_column_count(), 2);
}

#[test]
fn test_analyze_semicolon_separator() {
    let content = "a;b\n1;x\n2;y\n";
    let file = create_test_file(content);

    let parser = ParserConfig::default().with_separator(";").unwrap();
    let profiler = Profiler::with_config(ProfilerConfig::default().with_parser(parser));
    let result = profiler.analyze(file.path()).expect("Analysis failed");

    assert_eq!(result.report.column_count, 2);
    assert!(result.report.column("a").unwrap().is_numeric());
}

#[test]
fn test_analyze_windows_1251() {
    let bytes = b"\xe3\xee\xf0\xee\xe4,n\n\xcc\xee\xf1\xea\xe2\xe0,1\n\xca\xe0\xe7\xe0\xed\xfc,2\n";
    let file = create_test_file_bytes(bytes);

    let parser = ParserConfig::default().with_encoding("windows-1251");
    let profiler = Profiler::with_config(ProfilerConfig::default().with_parser(parser));
    let result = profiler.analyze(file.path()).expect("Analysis failed");

    assert_eq!(result.report.columns[0].name, "город");
    let top = &result.report.top_categories["город"];
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].value, "Казань");
}

#[test]
fn test_column_statistics() {
    let content = "x\n1\n2\n3\n4\n\n";
    let file = create_test_file(content);

    let result = Profiler::new().analyze(file.path()).expect("Analysis failed");
    let x = result.report.column("x").unwrap();

    // Blank line at the end of the file is not a row.
    assert_eq!(result.report.row_count, 4);
    assert_eq!(x.missing_count, 0);
    match &x.kind {
        ColumnKind::Numeric(summary) => {
            assert_eq!(summary.min, 1.0);
            assert_eq!(summary.max, 4.0);
            assert!((summary.mean - 2.5).abs() < 1e-12);
            assert!((summary.std - 1.290_994_448_735_805_6).abs() < 1e-9);
        }
        ColumnKind::Categorical => panic!("x should be numeric"),
    }
}

#[test]
fn test_missing_tokens() {
    let content = "a,b\n1,NA\n2,\n3,null\n4,x\n";
    let file = create_test_file(content);

    let result = Profiler::new().analyze(file.path()).expect("Analysis failed");
    let b = result.report.missingness.get("b").unwrap();

    assert_eq!(b.missing_count, 3);
    assert_eq!(b.missing_share, 0.75);
    assert_eq!(result.report.details.max_missing_share, 0.75);
    assert!(result.report.flags.too_many_missing);
}

// =============================================================================
// Quality Scenario Tests
// =============================================================================

#[test]
fn test_zero_heavy_small_dataset() {
    let mut content = String::from("amount\n");
    for i in 0..50 {
        content.push_str(if i == 0 { "7\n" } else { "0\n" });
    }
    let file = create_test_file(&content);

    let report = Profiler::new().analyze(file.path()).expect("Analysis failed").report;

    assert!(report.flags.has_many_zero_values);
    assert!(report.flags.too_few_rows);
    assert!(!report.flags.has_constant_columns);
    assert!((report.details.max_zero_share - 0.98).abs() < 1e-12);
    assert!(report.quality_score <= 1.0 - 0.2 - 0.05 + 1e-9);
}

#[test]
fn test_constant_and_high_cardinality_columns() {
    let mut content = String::from("c0,c1,c2,c3,c4,c5,c6,c7,constant,label\n");
    for row in 0..60 {
        for col in 0..8 {
            content.push_str(&format!("{},", row * (col + 1)));
        }
        content.push_str(&format!("same,label_{}\n", row));
    }
    let file = create_test_file(&content);

    let report = Profiler::new().analyze(file.path()).expect("Analysis failed").report;

    assert_eq!(report.column_count, 10);
    assert!(report.flags.has_constant_columns);
    assert!(report.flags.has_high_cardinality_categoricals);
    assert_eq!(report.details.constant_columns, vec!["constant"]);
    assert_eq!(report.details.high_cardinality_columns, vec!["label"]);
}

#[test]
fn test_clean_dataset_scores_high() {
    let mut content = String::from("x,y,group\n");
    for row in 0..200 {
        content.push_str(&format!("{},{},{}\n", row, row % 7 + 1, ["a", "b", "c"][row % 3]));
    }
    let file = create_test_file(&content);

    let report = Profiler::new().analyze(file.path()).expect("Analysis failed").report;

    assert!(!report.flags.any());
    assert_eq!(report.quality_score, 1.0);
    assert!(report.assessment(&QualityConfig::default()).ok_for_model);
}

#[test]
fn test_correlation_of_linear_columns() {
    let content = "a,b,c\n1,2,5\n2,4,3\n3,6,4\n4,8,1\n";
    let file = create_test_file(content);

    let report = Profiler::new().analyze(file.path()).expect("Analysis failed").report;
    let matrix = report.correlation.expect("two numeric columns");

    assert!((matrix.get("a", "b").unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(matrix.get("a", "c"), matrix.get("c", "a"));
    assert_eq!(matrix.get("b", "b"), Some(1.0));
}

#[test]
fn test_single_numeric_column_has_no_correlation() {
    let content = "a,b\n1,x\n2,y\n";
    let file = create_test_file(content);

    let report = Profiler::new().analyze(file.path()).expect("Analysis failed").report;
    assert!(report.correlation.is_none());
}

#[test]
fn test_custom_thresholds() {
    let content = "z\n0\n0\n1\n1\n";
    let file = create_test_file(content);

    let config = ProfilerConfig::default()
        .with_quality(QualityConfig::default().with_zero_share_threshold(0.4));
    let report = Profiler::with_config(config)
        .analyze(file.path())
        .expect("Analysis failed")
        .report;

    assert!(report.flags.has_many_zero_values);
}

#[test]
fn test_report_is_deterministic() {
    let content = "a,b,c\n1,x,0\n2,y,0\n3,x,1\n,z,0\n";
    let file = create_test_file(content);
    let profiler = Profiler::new();

    let first = profiler.analyze(file.path()).unwrap().report;
    let second = profiler.analyze(file.path()).unwrap().report;

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_missing_file() {
    let err = Profiler::new().analyze("/nonexistent/data.csv").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_header_only_file() {
    let file = create_test_file("a,b,c\n");
    let err = Profiler::new().analyze(file.path()).unwrap_err();
    assert!(matches!(err, EdaError::Schema(_)));
}

#[test]
fn test_empty_file() {
    let file = create_test_file("");
    let err = Profiler::new().analyze(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn test_invalid_utf8() {
    let file = create_test_file_bytes(b"a\nok\n\xff\xfe\n");
    let err = Profiler::new().analyze(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_extra_fields_fail_instead_of_truncating() {
    let file = create_test_file("name\nSmith, John\nDoe\n");
    let parser = ParserConfig::default().with_separator(",").unwrap();
    let err = Profiler::with_config(ProfilerConfig::default().with_parser(parser))
        .analyze(file.path())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_unsupported_encoding() {
    let file = create_test_file("a\n1\n");
    let parser = ParserConfig::default().with_encoding("klingon-8");
    let err = Profiler::with_config(ProfilerConfig::default().with_parser(parser))
        .analyze(file.path())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// =============================================================================
// Aggregated Metrics Tests
// =============================================================================

#[test]
fn test_assess_metrics_matches_report_flags() {
    let content = "a,b\n1,x\n2,\n";
    let file = create_test_file(content);
    let report = Profiler::new().analyze(file.path()).unwrap().report;

    let assessment = assess_metrics(
        &report.metrics(),
        &QualityConfig::default(),
        &ScoreWeights::default(),
    )
    .unwrap();

    assert_eq!(assessment.flags, report.metric_flags());
}

#[test]
fn test_assess_metrics_rejects_bad_share() {
    let metrics = DatasetMetrics {
        n_rows: 10,
        n_cols: 2,
        max_missing_share: -0.1,
        numeric_cols: 1,
        categorical_cols: 1,
    };
    let err = assess_metrics(&metrics, &QualityConfig::default(), &ScoreWeights::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
