use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lumiweight"))
}

fn repo_root() -> PathBuf {
    // crates/lw-cli -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").canonicalize().unwrap()
}

fn fixture_path(name: &str) -> PathBuf {
    repo_root().join("tests/fixtures").join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

#[test]
fn report_lists_effective_luminosities() {
    let catalog = fixture_path("lumi_catalog.json");
    assert!(catalog.exists(), "missing fixture: {}", catalog.display());

    let out = run(&["report", "--catalog", catalog.to_string_lossy().as_ref()]);
    assert!(
        out.status.success(),
        "report should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["mode"], "add");
    assert_eq!(report["datasets"].as_array().unwrap().len(), 3);
    // runA: 10.0 at prescale 16 -> 0.625
    let run_a = &report["datasets"][0];
    assert_eq!(run_a["name"], "qcd_dijet_runA");
    assert!((run_a["effective_luminosity"].as_f64().unwrap() - 0.625).abs() < 1e-12);
    // add mode: 0.625 + 20.0 + 15.0
    let combined = report["combined_effective_luminosity"].as_f64().unwrap();
    assert!((combined - 35.625).abs() < 1e-12);
}

#[test]
fn report_merge_mode_takes_minimum() {
    let catalog = fixture_path("lumi_catalog.json");

    let out = run(&[
        "report",
        "--catalog",
        catalog.to_string_lossy().as_ref(),
        "--mode",
        "merge",
    ]);
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let combined = report["combined_effective_luminosity"].as_f64().unwrap();
    assert!((combined - 0.625).abs() < 1e-12);
}

#[test]
fn report_rejects_unknown_mode() {
    let catalog = fixture_path("lumi_catalog.json");

    let out = run(&[
        "report",
        "--catalog",
        catalog.to_string_lossy().as_ref(),
        "--mode",
        "concatenate",
    ]);
    assert!(!out.status.success(), "unknown mode must be rejected");
}

#[test]
fn report_rejects_unknown_dataset() {
    let catalog = fixture_path("lumi_catalog.json");

    let out = run(&[
        "report",
        "--catalog",
        catalog.to_string_lossy().as_ref(),
        "--datasets",
        "no_such_dataset",
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no_such_dataset"), "stderr should name the dataset: {}", stderr);
}
