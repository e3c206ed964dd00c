//! Edge case tests for unusual CSV content

use crate::common::TestFixture;
use flowdiff::compare::{compare_datasets, CompareOptions};
use flowdiff::data::{count_data_rows, read_csv, read_header};
use flowdiff::output::PrettyPrinter;
use flowdiff::{CsvOptions, DatasetConfig, DatasetVariant, FlowdiffError};

#[test]
fn test_empty_file_loads_as_empty_table() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_csv_raw("empty.csv", "").unwrap();

    let table = read_csv(&path, None, &CsvOptions::default()).unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 0);
    assert!(read_header(&path, &CsvOptions::default()).unwrap().is_empty());
    assert_eq!(count_data_rows(&path).unwrap(), 0);
}

#[test]
fn test_header_only_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_csv_raw("header.csv", "id,name,price\n").unwrap();

    let table = read_csv(&path, None, &CsvOptions::default()).unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 3);
}

#[test]
fn test_crlf_line_endings() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_csv_raw("crlf.csv", "a,b\r\n1,2\r\n3,4\r\n").unwrap();

    let table = read_csv(&path, None, &CsvOptions::default()).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[1], vec!["3".to_string(), "4".to_string()]);
    assert_eq!(count_data_rows(&path).unwrap(), 2);
}

#[test]
fn test_quoted_newline_counts_physical_lines() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_csv_raw("quoted.csv", "id,note\n1,\"first line\nsecond line\"\n")
        .unwrap();

    let table = read_csv(&path, None, &CsvOptions::default()).unwrap();
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows()[0][1], "first line\nsecond line");
    assert_eq!(count_data_rows(&path).unwrap(), 2);
}

#[test]
fn test_unicode_and_quotes() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_csv_raw("unicode.csv", "id,name\n1,Café\n2,\"Product,D\"\n3,\"Say \"\"hi\"\"\"\n")
        .unwrap();

    let table = read_csv(&path, None, &CsvOptions::default()).unwrap();
    assert_eq!(table.column("name").unwrap(), vec!["Café", "Product,D", "Say \"hi\""]);
}

#[test]
fn test_malformed_csv_propagates_parser_error() {
    let fixture = TestFixture::new().unwrap();
    fixture.create_csv_raw("MachineLearningCSV/bad.csv", "a,b\n1,2,3\n").unwrap();

    let err = fixture
        .resolver()
        .load_file("bad.csv", DatasetVariant::Ml, None, &CsvOptions::default())
        .unwrap_err();
    assert!(matches!(err, FlowdiffError::Csv(_)));
}

#[test]
fn test_trimmed_headers() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_csv_raw("spaced.csv", "Flow ID, Label\nx, BENIGN\n").unwrap();

    let table = read_csv(&path, None, &CsvOptions::default().trimmed(true)).unwrap();
    assert_eq!(table.columns(), &["Flow ID".to_string(), "Label".to_string()]);
    assert_eq!(table.column("Label").unwrap(), vec!["BENIGN"]);
}

#[test]
fn test_ml_file_without_rows_has_no_ratio() {
    let fixture = TestFixture::new().unwrap();
    let flow = fixture.create_dir("flow").unwrap();
    let ml = fixture.create_dir("ml").unwrap();
    fixture.create_csv_raw("flow/day.csv", "a\n1\n2\n").unwrap();
    fixture.create_csv_raw("ml/day.csv", "a\n").unwrap();

    let cmp = compare_datasets(&flow, &ml, &CompareOptions::from_config(&DatasetConfig::default())).unwrap();
    let mismatch = cmp.mismatches().next().unwrap();
    assert_eq!(mismatch.ml_rows, 0);
    assert!(mismatch.ratio().is_none());
    assert!(PrettyPrinter::render_comparison(&cmp).contains("  Ratio: n/a"));
}
