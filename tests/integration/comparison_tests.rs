//! End-to-end comparison of the two dataset variants

use crate::common::{sample_data, TestFixture, FLOW_SUBDIR, ML_SUBDIR};
use flowdiff::compare::{compare_datasets, run_comparison, CompareOptions};
use flowdiff::output::{JsonFormatter, PrettyPrinter};
use flowdiff::{DatasetConfig, FlowdiffError};

fn options() -> CompareOptions {
    CompareOptions::from_config(&DatasetConfig::default())
}

#[test]
fn test_run_comparison_on_cicids_layout() {
    let fixture = TestFixture::new().unwrap();
    fixture.create_cicids_layout().unwrap();

    let cmp = run_comparison(&fixture.config(), false).unwrap();
    assert_eq!(cmp.flow_file_count, 3);
    assert_eq!(cmp.ml_file_count, 2);
    assert_eq!(cmp.flow_dir, fixture.root().join(FLOW_SUBDIR));
    assert_eq!(cmp.ml_dir, fixture.root().join(ML_SUBDIR));

    let columns = cmp.columns.as_ref().unwrap();
    let flow_only: Vec<&str> = columns.flow_only.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(flow_only, vec![" Source IP", " Timestamp", "Flow ID"]);
    assert!(columns.ml_only.is_empty());
    assert_eq!(columns.common, 3);
    assert_eq!(columns.union, 6);

    // Tuesday has no ML counterpart
    assert_eq!(cmp.row_counts.len(), 2);
    let mismatches: Vec<_> = cmp.mismatches().collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].file, "Thursday-WorkingHours-Morning-WebAttacks.pcap_ISCX.csv");
    assert_eq!(mismatches[0].flow_rows, 5);
    assert_eq!(mismatches[0].ml_rows, 4);
    assert_eq!(mismatches[0].ratio(), Some(1.25));
}

#[test]
fn test_label_distribution_for_sample_file() {
    let fixture = TestFixture::new().unwrap();
    fixture.create_cicids_layout().unwrap();

    let mut config = fixture.config();
    config.sample_file = "Thursday-WorkingHours-Morning-WebAttacks.pcap_ISCX.csv".to_string();

    let cmp = run_comparison(&config, false).unwrap();
    let labels = cmp.labels.unwrap();
    assert_eq!(labels.column, " Label");

    let flow: Vec<(&str, usize)> = labels.flow.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(flow, vec![("BENIGN", 3), ("Web Attack", 2)]);
    let ml: Vec<(&str, usize)> = labels.ml.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(ml, vec![("BENIGN", 3), ("Web Attack", 1)]);
}

#[test]
fn test_sample_file_missing_skips_labels() {
    let fixture = TestFixture::new().unwrap();
    fixture.create_cicids_layout().unwrap();

    let mut config = fixture.config();
    config.sample_file = "Tuesday-WorkingHours.pcap_ISCX.csv".to_string();

    let cmp = run_comparison(&config, false).unwrap();
    assert!(cmp.labels.is_none());
    assert!(!PrettyPrinter::render_comparison(&cmp).contains("5. LABEL DISTRIBUTION"));
}

#[test]
fn test_missing_label_column_is_an_error() {
    let fixture = TestFixture::new().unwrap();
    fixture.create_cicids_layout().unwrap();

    let mut config = fixture.config();
    config.label_column = "Label".to_string();

    let err = run_comparison(&config, false).unwrap_err();
    assert!(matches!(err, FlowdiffError::ColumnNotFound { ref column, .. } if column == "Label"));
}

#[test]
fn test_missing_variant_is_a_config_error() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .create_csv(&format!("{}/a.csv", ML_SUBDIR), &sample_data::simple_csv_data())
        .unwrap();

    let err = run_comparison(&fixture.config(), false).unwrap_err();
    match err {
        FlowdiffError::Config { message } => {
            assert!(message.contains("flow dataset"));
            assert!(message.contains("GeneratedLabelledFlows"));
        }
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_compare_directories_directly() {
    let fixture = TestFixture::new().unwrap();
    let flow = fixture.create_dir("flow").unwrap();
    let ml = fixture.create_dir("ml").unwrap();
    fixture.create_generated_csv("flow/same.csv", &["a", "b"], 10).unwrap();
    fixture.create_generated_csv("ml/same.csv", &["a", "b"], 10).unwrap();

    let cmp = compare_datasets(&flow, &ml, &options()).unwrap();
    assert!(cmp.columns.as_ref().unwrap().is_identical());
    assert_eq!(cmp.row_counts.len(), 1);
    assert!(!cmp.has_mismatches());
    assert!(cmp.labels.is_none());
}

#[test]
fn test_compare_with_empty_side_skips_columns() {
    let fixture = TestFixture::new().unwrap();
    let flow = fixture.create_dir("flow").unwrap();
    let ml = fixture.create_dir("ml").unwrap();
    fixture.create_generated_csv("flow/only.csv", &["a"], 3).unwrap();

    let cmp = compare_datasets(&flow, &ml, &options()).unwrap();
    assert!(cmp.columns.is_none());
    assert!(cmp.row_counts.is_empty());
    assert_eq!(cmp.flow_file_count, 1);
    assert_eq!(cmp.ml_file_count, 0);
}

#[test]
fn test_pretty_and_json_reports() {
    let fixture = TestFixture::new().unwrap();
    fixture.create_cicids_layout().unwrap();
    let cmp = run_comparison(&fixture.config(), false).unwrap();

    let text = PrettyPrinter::render_comparison(&cmp);
    assert!(text.contains("GeneratedLabelledFlows files: 3"));
    assert!(text.contains("MachineLearningCSV files: 2"));
    assert!(text.contains("COMMON COLUMNS: 3/6"));
    assert!(text.contains("File: Thursday-WorkingHours-Morning-WebAttacks.pcap_ISCX.csv"));
    assert!(text.contains("  Ratio: 1.250x"));
    assert!(text.contains("5. LABEL DISTRIBUTION (Monday-WorkingHours.pcap_ISCX.csv)"));

    let json: serde_json::Value =
        serde_json::from_str(&JsonFormatter::format_comparison(&cmp).unwrap()).unwrap();
    assert_eq!(json["labels"]["flow"]["BENIGN"], 3);
    assert_eq!(json["row_counts"].as_array().unwrap().len(), 2);
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_repeated_header_counts_as_shared_column() {
    let fixture = TestFixture::new().unwrap();
    let flow = fixture.create_dir("flow").unwrap();
    let ml = fixture.create_dir("ml").unwrap();
    fixture
        .create_csv_raw("flow/day.csv", "Flow ID, Fwd Header Length, Fwd Header Length, Label\n1,2,3,BENIGN\n")
        .unwrap();
    fixture
        .create_csv_raw("ml/day.csv", " Fwd Header Length, Fwd Header Length, Label\n2,3,BENIGN\n")
        .unwrap();

    let cmp = compare_datasets(&flow, &ml, &options()).unwrap();
    let columns = cmp.columns.unwrap();
    assert_eq!(columns.flow_columns.len(), 4);
    assert_eq!(columns.ml_columns.len(), 3);
    assert_eq!(columns.common, 3);
    assert_eq!(columns.union, 4);

    let flow_only: Vec<&str> = columns.flow_only.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(flow_only, vec!["Flow ID"]);
    assert!(columns.ml_only.is_empty());
}
