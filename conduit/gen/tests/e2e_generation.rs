//! End-to-end tests: generate connectors and verify they compile.
//!
//! The generated modules are written into a throwaway crate next to a
//! hand-written `api` module holding the traits and user types they
//! implement, and the crate depends on the `conduit` runtime by path. The
//! compile check is slow since it invokes `cargo check`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use conduit_gen::manifest::Manifest;
use conduit_gen::output::generate_and_write_all;
use tempfile::TempDir;

/// Traits and types the `shapes.yaml` interfaces are declared against.
const API_RS: &str = r#"//! Interfaces the generated connectors implement.

pub use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Order {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub sku: String,
}

#[derive(Debug, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct DefaultBaseUrl {
    pub url: String,
}

#[allow(non_snake_case)]
pub trait Orders {
    fn get_order(&self, orderId: i64) -> conduit::Result<Order>;

    fn search(&self, filters: Option<HashMap<String, String>>) -> conduit::Result<()>;

    #[allow(clippy::ptr_arg)]
    fn search_borrowed(
        &self,
        filters: Option<&HashMap<String, String>>,
        labels: &BTreeMap<String, u32>,
        tags: &Vec<String>,
        ids: &[u64],
        regions: Option<&Vec<String>>,
    ) -> conduit::Result<Vec<Order>>;

    fn find(
        &self,
        filter: Option<OrderFilter>,
        tags: Vec<String>,
        bytes: [u8; 4],
        page: Option<u32>,
        sort: &str,
        ctx: u8,
    ) -> conduit::Result<Vec<Order>>;

    fn slot(&self, id: u64, second: String, first: u64) -> conduit::Result<Vec<Order>>;

    fn create(&self, order: NewOrder, trace: String) -> conduit::Result<Order>;

    fn update(&self, id: u64, order: Option<NewOrder>, tenant: &str) -> conduit::Result<()>;

    fn defaults(&self) -> conduit::Result<DefaultBaseUrl>;
}

pub trait Billing {
    fn invoices(&self) -> conduit::Result<Vec<Order>>;

    fn ping(&self) -> conduit::Result<()>;
}
"#;

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Writes the manifest of the throwaway crate.
fn write_cargo_toml(crate_dir: &Path) {
    let runtime = manifest_dir()
        .join("..")
        .canonicalize()
        .expect("Failed to locate the conduit runtime crate");
    let content = format!(
        r#"[package]
name = "conduit-e2e"
version = "0.0.0"
edition = "2024"
publish = false

[dependencies]
conduit = {{ path = {runtime:?} }}
serde = {{ version = "1.0", features = ["derive"] }}

[workspace]
"#,
        runtime = runtime.display().to_string()
    );
    fs::write(crate_dir.join("Cargo.toml"), content).expect("Failed to write Cargo.toml");

    // Reuse the workspace's resolved versions so the check can run offline.
    let lock = manifest_dir().join("../../Cargo.lock");
    if lock.exists() {
        fs::copy(&lock, crate_dir.join("Cargo.lock")).expect("Failed to copy Cargo.lock");
    }
}

/// Generates the `shapes.yaml` connectors into `crate_dir/src`.
fn generate_crate(crate_dir: &Path) {
    let manifest = Manifest::load(&manifest_dir().join("tests/fixtures/shapes.yaml"))
        .expect("Failed to load manifest");
    let src_dir = crate_dir.join("src");
    generate_and_write_all(&manifest.interfaces, &manifest.options, &src_dir, false)
        .expect("Failed to generate code");

    fs::write(src_dir.join("api.rs"), API_RS).expect("Failed to write api.rs");
    let lib_path = src_dir.join("lib.rs");
    let mut lib = fs::read_to_string(&lib_path).expect("Failed to read lib.rs");
    lib.push_str("\npub mod api;\n");
    fs::write(&lib_path, lib).expect("Failed to write lib.rs");

    write_cargo_toml(crate_dir);
}

/// Tests that generated code compiles against the runtime.
///
/// This test:
/// 1. Generates every connector of `shapes.yaml` into a temporary crate
/// 2. Adds the `api` module with the traits and user types
/// 3. Runs `cargo check` on the crate
#[test]
#[ignore = "slow: compiles generated code"]
fn generated_code_compiles() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let crate_dir = temp_dir.path().join("connectors");
    generate_crate(&crate_dir);

    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let output = Command::new(cargo)
        .args(["check", "--offline", "--manifest-path"])
        .arg(crate_dir.join("Cargo.toml"))
        .output()
        .expect("Failed to run cargo check");

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "Generated code failed to compile:\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
            stdout, stderr
        );
    }
}

/// Verifies the generated files exist and have expected content.
#[test]
fn generated_files_exist_and_have_expected_structure() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let crate_dir = temp_dir.path().join("connectors");
    generate_crate(&crate_dir);
    let src_dir = crate_dir.join("src");

    for file in ["lib.rs", "orders.rs", "billing.rs", "api.rs"] {
        assert!(src_dir.join(file).exists(), "{file} should exist");
    }
    assert!(!src_dir.join("lib.tmp").exists());

    let cargo = fs::read_to_string(crate_dir.join("Cargo.toml")).expect("Failed to read Cargo.toml");
    assert!(cargo.contains("conduit = { path = "));

    let lib = fs::read_to_string(src_dir.join("lib.rs")).expect("Failed to read lib.rs");
    assert!(lib.starts_with("// This code was automatically generated by conduit-gen."));
    assert!(lib.contains("pub mod orders;"));
    assert!(lib.contains("pub use billing::BillingConnector;"));
    assert!(lib.trim_end().ends_with("pub mod api;"));

    let orders = fs::read_to_string(src_dir.join("orders.rs")).expect("Failed to read orders.rs");
    assert!(orders.contains("use crate::api::*;"));
    // Borrowed containers are iterated through a single reference.
    assert!(orders.contains("let filters = &**filters;"));
    assert!(orders.contains("let labels = &*labels;"));
    assert!(orders.contains("let tags = &*tags;"));
    assert!(orders.contains("let regions = &**regions;"));
    // Owned containers are borrowed as before.
    assert!(orders.contains("let bytes = &bytes;"));
    // A return type named like a shell constant keeps both definitions apart.
    assert!(orders.contains("pub const DEFAULT_BASE_URL_TYPE: ::conduit::TypeToken<DefaultBaseUrl>"));
    assert_eq!(orders.matches("pub const DEFAULT_BASE_URL:").count(), 1);

    let billing = fs::read_to_string(src_dir.join("billing.rs")).expect("Failed to read billing.rs");
    assert!(billing.contains("\"http://billing.internal/v2\""));
    assert!(billing.contains("::conduit::HttpMethod::Head"));
}
