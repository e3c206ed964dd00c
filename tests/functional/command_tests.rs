//! Commands run end to end against a temporary dataset

use crate::common::CliTestRunner;
use flowdiff::{DatasetConfig, FlowdiffError};
use std::path::PathBuf;

#[test]
fn test_probe_summary_and_compare_succeed() {
    let runner = CliTestRunner::new().unwrap();
    runner.fixture().create_cicids_layout().unwrap();

    runner.expect_success(&["probe"]);
    runner.expect_success(&["probe", "--format", "json"]);
    runner.expect_success(&["summary"]);
    runner.expect_success(&["summary", "--format", "json"]);
    runner.expect_success(&["compare", "--no-progress"]);
    runner.expect_success(&["compare", "--format", "json"]);
}

#[test]
fn test_probe_on_missing_base_still_succeeds() {
    let runner = CliTestRunner::new().unwrap();
    let missing = runner.fixture().root().join("nowhere");
    runner.expect_success(&["probe", "--base", missing.to_str().unwrap()]);
}

#[test]
fn test_compare_without_datasets_fails() {
    let runner = CliTestRunner::new().unwrap();
    let err = runner.expect_failure(&["compare", "--no-progress"]);
    assert!(matches!(err, FlowdiffError::Config { .. }));
}

#[test]
fn test_invalid_format_is_rejected() {
    let runner = CliTestRunner::new().unwrap();
    let err = runner.expect_failure(&["summary", "--format", "xml"]);
    assert!(err.to_string().contains("Invalid output format"));
}

#[test]
fn test_load_commands() {
    let runner = CliTestRunner::new().unwrap();
    runner.fixture().create_cicids_layout().unwrap();

    runner.expect_success(&["load", "monday-workinghours.pcap_iscx.csv", "--rows", "2"]);
    runner.expect_success(&["load", "Monday-WorkingHours.pcap_ISCX.csv", "--variant", "flow", "--columns", " Label"]);
    runner.expect_success(&["load-all", "--variant", "flow", "--preview", "0"]);
}

#[test]
fn test_load_unknown_file_reports_available_files() {
    let runner = CliTestRunner::new().unwrap();
    runner.fixture().create_cicids_layout().unwrap();

    let err = runner.expect_failure(&["load", "Friday.csv"]);
    let msg = err.to_string();
    assert!(msg.contains("Friday.csv"));
    assert!(msg.contains("Monday-WorkingHours.pcap_ISCX.csv"));
}

#[test]
fn test_load_invalid_variant() {
    let runner = CliTestRunner::new().unwrap();
    let err = runner.expect_failure(&["load", "a.csv", "--variant", "raw"]);
    assert!(matches!(err, FlowdiffError::InvalidInput { .. }));
}

#[test]
fn test_init_writes_config_and_refuses_overwrite() {
    let runner = CliTestRunner::new().unwrap();
    let path: PathBuf = runner.fixture().root().join("flowdiff.json");
    let path_str = path.to_str().unwrap();

    runner.expect_success(&["init", path_str]);
    let config = DatasetConfig::load(&path).unwrap();
    assert_eq!(config.base_path, runner.fixture().root());

    let err = runner.expect_failure(&["init", path_str]);
    assert!(matches!(err, FlowdiffError::Config { .. }));
    runner.expect_success(&["init", path_str, "--force"]);
}

#[test]
fn test_config_file_drives_layout() {
    let runner = CliTestRunner::new().unwrap();
    runner.fixture().create_csv_raw("flows/day.csv", "a\n1\n2\n").unwrap();
    runner.fixture().create_csv_raw("features/day.csv", "a\n1\n").unwrap();

    let mut config = DatasetConfig::with_base(runner.fixture().root());
    config.flow_dir = "flows".to_string();
    config.ml_dir = "features".to_string();
    let path = runner.fixture().root().join("layout.json");
    config.save(&path).unwrap();

    runner.expect_success(&["compare", "--no-progress", "--config", path.to_str().unwrap()]);
}
