use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("conduit-gen")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("HTTP connectors"))
        .stdout(predicate::str::contains("--manifest"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("conduit-gen")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("conduit-gen"));
}

#[test]
fn test_manifest_is_required() {
    cargo_bin_cmd!("conduit-gen")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--manifest"));
}

// ============================================================================
// Generation Tests
// ============================================================================

#[test]
fn test_writes_connector_modules() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("src");

    cargo_bin_cmd!("conduit-gen")
        .arg("--manifest")
        .arg(fixture("orders.yaml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated"));

    let lib = fs::read_to_string(output.join("lib.rs")).unwrap();
    assert!(lib.contains("pub mod orders;"));
    assert!(lib.contains("pub use billing::BillingConnector;"));

    let orders = fs::read_to_string(output.join("orders.rs")).unwrap();
    assert!(orders.contains("pub struct OrdersConnector<T>"));
    assert!(orders.contains("/// Order lookups against the orders service."));

    let billing = fs::read_to_string(output.join("billing.rs")).unwrap();
    assert!(billing.contains("\"http://billing.internal\""));
    assert!(billing.contains("Idempotency-Key"));
}

#[test]
fn test_dry_run_prints_without_writing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("src");

    cargo_bin_cmd!("conduit-gen")
        .arg("--manifest")
        .arg(fixture("orders.yaml"))
        .arg("--output")
        .arg(&output)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== lib.rs ==="))
        .stdout(predicate::str::contains("=== orders.rs ==="))
        .stdout(predicate::str::contains("OrdersConnector"));

    assert!(!output.exists());
}

#[test]
fn test_verbose_logs_written_files() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("conduit-gen")
        .arg("--manifest")
        .arg(fixture("orders.yaml"))
        .arg("--output")
        .arg(dir.path())
        .arg("-v")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("wrote generated file"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_unsupported_verb_fails_without_output() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("conduit-gen")
        .arg("--manifest")
        .arg(fixture("bad_verb.json"))
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unsupported HTTP verb 'FETCH' on Orders::get_order",
        ));

    assert!(!dir.path().join("lib.rs").exists());
}

#[test]
fn test_missing_manifest_fails() {
    cargo_bin_cmd!("conduit-gen")
        .args(["--manifest", "does-not-exist.yaml", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read 'does-not-exist.yaml'"));
}
