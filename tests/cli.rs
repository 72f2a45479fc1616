use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(format!("dataset-loader {}\n", env!("CARGO_PKG_VERSION")));
}

// Local subcommand tests

#[test]
fn local_csv_table_summary() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["local", "tests/fixtures/sample.csv", "--table"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Table: 2 row(s) x 2 column(s)"))
        .stdout(predicates::str::contains("a  i64"));
}

#[test]
fn local_csv_dataset_summary() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["local", "tests/fixtures/sample.csv"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Dataset: csv (csv)"))
        .stdout(predicates::str::contains("train: 1 file(s)"));
}

#[test]
fn local_json_output_format() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args([
        "local",
        "tests/fixtures/sample.jsonl",
        "--type",
        "json",
        "--table",
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"kind\": \"table\""))
        .stdout(predicates::str::contains("\"rows\": 2"));
}

#[test]
fn local_missing_file_fails() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["local", "missing.json", "--type", "json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("missing.json"));
}

#[test]
fn local_unsupported_type_fails() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["local", "tests/fixtures/sample.csv", "--type", "xml"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Dataset type xml not supported"));
}

#[test]
fn local_without_path_fails() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["local", "--table"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("'path'"));
}

#[test]
fn local_options_file_supplies_reader_settings() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args([
        "local",
        "tests/fixtures/semicolon.csv",
        "--options",
        "tests/fixtures/semicolon.options.yaml",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Table: 3 row(s) x 2 column(s)"))
        .stdout(predicates::str::contains("score"));
}

#[test]
fn local_unreadable_options_file_fails() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args([
        "local",
        "tests/fixtures/sample.csv",
        "--options",
        "tests/fixtures/no_such_options.yaml",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to read options file"));
}

#[test]
fn local_head_prints_rows() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["local", "tests/fixtures/sample.jsonl", "--type", "json", "--table", "--head", "1"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("great film"))
        .stdout(predicates::str::contains("dull").not());
}

// Remote subcommand tests (argument checks only; no network)

#[test]
fn remote_without_dataset_fails() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["remote", "--split", "test"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("'dataset_name'"));
}

#[test]
fn remote_unknown_split_fails() {
    let mut cmd = Command::cargo_bin("dataset-loader").unwrap();
    cmd.args(["remote", "imdb", "--split", "unsupervised"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Split 'unsupervised' not supported"));
}
