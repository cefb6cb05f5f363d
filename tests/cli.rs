//! End-to-end tests for the `etl_bench` binary.

use std::process::Command;

use tempfile::TempDir;

fn etl_bench() -> Command {
    Command::new(env!("CARGO_BIN_EXE_etl_bench"))
}

#[test]
fn test_generate_then_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let dir = temp_dir.path();

    let status = etl_bench()
        .args(["--log-level", "warn", "generate", "--sizes", "30,45", "--dir"])
        .arg(dir)
        .status()
        .expect("Failed to run generate");
    assert!(status.success());
    assert!(dir.join("file1.csv").exists());
    assert!(dir.join("file2.csv").exists());

    let report_path = dir.join("report.json");
    let output = etl_bench()
        .args(["--log-level", "warn", "run"])
        .arg(format!("{}:30", dir.join("file1.csv").display()))
        .arg(dir.join("file2.csv"))
        .arg("--output-dir")
        .arg(dir.join("out"))
        .arg("--staging-db")
        .arg(dir.join("staging.db"))
        .arg("--report-json")
        .arg(&report_path)
        .output()
        .expect("Failed to run benchmark");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Staged+Parallel"));

    for slug in ["streaming", "staged", "staged_parallel"] {
        assert!(dir.join("out").join(slug).join("new_file1.csv").exists());
        assert!(dir.join("out").join(slug).join("new_file2.csv").exists());
    }

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["series"].as_array().unwrap().len(), 3);
    assert_eq!(report["series"][0]["points"][1]["record_count"], 45);
    assert_eq!(report["outcomes"].as_array().unwrap().len(), 6);
    assert_eq!(report["staging_mode"], "isolated");
}

#[test]
fn test_missing_input_exits_non_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = etl_bench()
        .args(["run"])
        .arg(temp_dir.path().join("nope.csv"))
        .arg("--staging-db")
        .arg(temp_dir.path().join("staging.db"))
        .arg("--output-dir")
        .arg(temp_dir.path().join("out"))
        .output()
        .expect("Failed to run benchmark");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.csv"));
}
