//! Runs the `regvar` binary end to end.

use std::path::Path;
use std::process::{Command, Output};

fn regvar(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_regvar"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("REGVAR_QUANTILE")
        .env_remove("REGVAR_TRIALS")
        .output()
        .expect("failed to launch regvar")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn convert_prints_reference_value() {
    let dir = tempfile::tempdir().unwrap();
    let output = regvar(&["convert", "--n", "259", "--quantile", "0.01"], dir.path());
    assert!(output.status.success());
    let value: f64 = stdout(&output).trim().parse().unwrap();
    assert!((value - 0.0062015503875969).abs() < 1e-12);
}

#[test]
fn convert_reports_errors_with_non_zero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let output = regvar(&["convert", "--n", "9", "--quantile", "0.5"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sample too short"));
}

#[test]
fn simulate_then_var_both_routes() {
    let dir = tempfile::tempdir().unwrap();
    let sim = regvar(
        &[
            "--format", "json", "simulate", "--output", "rates.csv", "--seed", "5",
            "--end-date", "2024-12-31",
        ],
        dir.path(),
    );
    assert!(sim.status.success(), "{}", String::from_utf8_lossy(&sim.stderr));
    let summary: serde_json::Value = serde_json::from_str(&stdout(&sim)).unwrap();
    assert_eq!(summary["rows"], 260);
    let positions: Vec<String> = summary["positions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_f64().unwrap().to_string())
        .collect();

    let var = regvar(
        &[
            "--format",
            "json",
            "var",
            "--input",
            "rates.csv",
            "--positions",
            &positions.join(","),
            "--method",
            "both",
        ],
        dir.path(),
    );
    assert!(var.status.success(), "{}", String::from_utf8_lossy(&var.stderr));
    let report: serde_json::Value = serde_json::from_str(&stdout(&var)).unwrap();
    assert_eq!(report["results"].as_array().unwrap().len(), 2);
    assert!(report["abs_diff"].as_f64().unwrap() < 1e-8);
}

#[test]
fn config_file_in_working_directory_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("regvar.toml"), "min_sample_size = 5\n").unwrap();
    let output = regvar(&["convert", "--n", "9", "--quantile", "0.5"], dir.path());
    assert!(output.status.success());
    let value: f64 = stdout(&output).trim().parse().unwrap();
    assert!((value - 0.5).abs() < 1e-12);
}

#[test]
fn validate_exit_status_follows_agreement() {
    let dir = tempfile::tempdir().unwrap();
    let pass = regvar(&["validate", "--trials", "20", "--seed", "1"], dir.path());
    assert!(pass.status.success());
    assert!(stdout(&pass).contains("PASSED"));

    let fail = regvar(
        &["validate", "--trials", "5", "--conversion-length", "260"],
        dir.path(),
    );
    assert!(!fail.status.success());
    assert!(stdout(&fail).contains("FAILED"));
}

#[test]
fn price_rejects_lowercase_option_type() {
    let dir = tempfile::tempdir().unwrap();
    let base = [
        "price",
        "--spot",
        "100",
        "--strike",
        "100",
        "--rate",
        "0.05",
        "--trade-date",
        "2023-01-01",
        "--expiry-date",
        "2024-01-01",
        "--volatility",
        "0.2",
        "--option-type",
    ];

    let mut ok = base.to_vec();
    ok.push("Call");
    let priced = regvar(&ok, dir.path());
    assert!(priced.status.success());
    let price: f64 = stdout(&priced).trim().parse().unwrap();
    assert!(price > 10.0 && price < 11.5);

    let mut bad = base.to_vec();
    bad.push("call");
    assert!(!regvar(&bad, dir.path()).status.success());
}
