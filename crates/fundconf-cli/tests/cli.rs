//! Command-line behaviour of the `fundconf` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Temporary root with a config file pointing at it.
fn setup() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let json = serde_json::json!({ "paths": { "root": dir.path() } });
    fs::write(&config, json.to_string()).unwrap();
    (dir, config)
}

fn fundconf(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fundconf").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("fundconf")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("codes"));
}

#[test]
fn test_codes_set_list_remove() {
    let (dir, config) = setup();

    fundconf(&config)
        .args(["codes", "set", "万联资管稳盈1号", "3012"])
        .assert()
        .success();
    fundconf(&config)
        .args(["codes", "set", "万联资管稳健1号", "A17"])
        .assert()
        .success();

    let saved = fs::read_to_string(dir.path().join("product_codes.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["万联资管稳盈1号"], 3012);
    assert_eq!(json["万联资管稳健1号"], "A17");

    fundconf(&config)
        .args(["codes", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3012\t万联资管稳盈1号"))
        .stdout(predicate::str::contains("2 products"));

    fundconf(&config)
        .args(["codes", "remove", "万联资管稳盈1号"])
        .assert()
        .success();
    fundconf(&config)
        .args(["codes", "remove", "万联资管稳盈1号"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found"));
}

#[test]
fn test_codes_import_into_conversion_file() {
    let (dir, config) = setup();
    let incoming = dir.path().join("incoming.json");
    fs::write(&incoming, r#"{"万联资管1号": 1, "万联资管2号": 2}"#).unwrap();

    fundconf(&config)
        .args(["codes", "--conversion", "import"])
        .arg(&incoming)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2"));
    assert!(dir.path().join("product_codes_conversion.json").exists());
    assert!(!dir.path().join("product_codes.json").exists());
}

#[test]
fn test_run_without_input_folder_fails() {
    let (_dir, config) = setup();
    fs::write(
        config.parent().unwrap().join("product_codes.json"),
        "{}",
    )
    .unwrap();

    fundconf(&config)
        .args(["run", "redemption", "--date", "20250115"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("input directory not found"))
        .stdout(predicate::str::contains("20250115"));
}

#[test]
fn test_run_reports_unreadable_files() {
    let (dir, config) = setup();
    fs::write(dir.path().join("product_codes.json"), "{}").unwrap();
    let folder = dir.path().join("2025/20250115/1场外开基/赎回确认");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("坏文件.pdf"), "not a pdf").unwrap();

    fundconf(&config)
        .args(["run", "redemption", "--date", "20250115"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("no records extracted"));
}

#[test]
fn test_run_rejects_bad_date() {
    let (_dir, config) = setup();
    fundconf(&config)
        .args(["run", "--all", "--date", "2025-01-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYYMMDD"));
}

#[test]
fn test_run_needs_kind_or_all() {
    let (_dir, config) = setup();
    fundconf(&config).arg("run").assert().failure();
}

#[test]
fn test_inspect_without_matches_fails() {
    let (dir, config) = setup();
    let pattern = dir.path().join("*.pdf");
    fundconf(&config)
        .args(["inspect", "--kind", "dividend"])
        .arg(pattern.to_string_lossy().as_ref())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_config_init_and_get() {
    let (dir, _) = setup();
    let config = dir.path().join("nested/config.json");

    fundconf(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());

    fundconf(&config)
        .args(["config", "get", "paths.section_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1场外开基"));

    fundconf(&config)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xml"));

    fundconf(&config)
        .args(["config", "set", "output.format", "csv"])
        .assert()
        .success();
    fundconf(&config)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("csv"));

    fundconf(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
