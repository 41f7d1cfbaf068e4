//! CLI integration tests for evg-matrix.
//!
//! These tests run the binary end to end and check the emitted document.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the evg-matrix binary command.
fn evg_matrix() -> Command {
    let mut cmd = Command::cargo_bin("evg-matrix").unwrap();
    cmd.env_remove("EVG_MATRIX_CONFIG");
    cmd
}

/// Create a temporary directory for config and output files.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn stdout_of(args: &[&str]) -> String {
    let output = evg_matrix().args(args).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

fn variant_count(yaml: &str) -> usize {
    yaml.lines().filter(|l| l.starts_with("- name: ")).count()
}

// ============================================================================
// evg-matrix generate
// ============================================================================

#[test]
fn test_generate_all() {
    let yaml = stdout_of(&["generate"]);

    assert!(yaml.starts_with("buildvariants:\n- name: ocsp-test-rhel8-v4.4-py3.9\n"));
    assert_eq!(variant_count(&yaml), 48);
}

#[test]
fn test_generate_server_only() {
    let yaml = stdout_of(&["generate", "--matrix", "server"]);

    assert!(yaml.starts_with("buildvariants:\n- name: test-rhel8-py3.9-auth-ssl-cov\n"));
    assert!(yaml.contains("  display_name: Test RHEL8 py3.9 Auth SSL cov\n"));
    assert!(yaml.contains("    - coverage_tag\n"));
    assert!(!yaml.contains("ocsp"));
    assert_eq!(variant_count(&yaml), 37);
}

#[test]
fn test_generate_ocsp_only() {
    let yaml = stdout_of(&["generate", "--matrix", "ocsp"]);

    assert!(yaml.contains("  batchtime: 20160\n"));
    assert!(yaml.contains("name: ocsp-test-win64-v8.0-py3.13\n"));
    assert!(!yaml.contains("v4.0"));
    assert_eq!(variant_count(&yaml), 11);
}

#[test]
fn test_generate_is_deterministic() {
    assert_eq!(stdout_of(&["generate"]), stdout_of(&["generate"]));
}

#[test]
fn test_generate_output_is_valid_yaml() {
    let yaml = stdout_of(&["generate"]);
    let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

    let variants = doc["buildvariants"].as_sequence().unwrap();
    assert_eq!(variants.len(), 48);

    let rhel = variants
        .iter()
        .find(|v| v["name"].as_str() == Some("test-rhel8-py3.10-auth-ssl"))
        .unwrap();
    assert!(rhel.get("expansions").is_some());
    assert_eq!(rhel["run_on"][0].as_str(), Some("rhel87-small"));
    assert_eq!(
        rhel["expansions"]["PYTHON_BINARY"].as_str(),
        Some("/opt/python/3.10/bin/python3")
    );
}

#[test]
fn test_generate_to_file() {
    let tmp = temp_dir();
    let path = tmp.path().join("variants.yml");

    evg_matrix()
        .args(["generate", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let yaml = fs::read_to_string(&path).unwrap();
    assert_eq!(variant_count(&yaml), 48);
}

#[test]
fn test_generate_with_config_override() {
    let tmp = temp_dir();
    let config = tmp.path().join("matrix.toml");
    fs::write(
        &config,
        "server_versions = [\"4.0\", \"7.0\", \"latest\"]\n\
         cpythons = [\"3.9\", \"3.13\"]\n\
         pypys = [\"3.10\"]\n",
    )
    .unwrap();

    let output = evg_matrix()
        .args(["generate", "--matrix", "ocsp", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let yaml = String::from_utf8(output.stdout).unwrap();
    // 2 servers cycled against 3 pythons, then 2 hosts x 1 release
    assert_eq!(variant_count(&yaml), 5);
    assert!(yaml.contains("name: ocsp-test-rhel8-latest-py3.13\n"));
}

#[test]
fn test_generate_rejects_empty_axis() {
    let tmp = temp_dir();
    let config = tmp.path().join("matrix.toml");
    fs::write(&config, "topologies = []\n").unwrap();

    evg_matrix()
        .args(["generate", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid matrix config"))
        .stderr(predicate::str::contains("topologies"));
}

#[test]
fn test_generate_rejects_colliding_variant_names() {
    let tmp = temp_dir();
    let config = tmp.path().join("matrix.toml");
    fs::write(&config, "[[auth_ssl]]\nauth = \"noauth\"\nssl = \"nossl\"\n").unwrap();

    evg_matrix()
        .args(["generate", "--matrix", "server", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid matrix config"))
        .stderr(predicate::str::contains("auth_ssl"));
}

#[test]
fn test_generate_rejects_malformed_config() {
    let tmp = temp_dir();
    let config = tmp.path().join("matrix.toml");
    fs::write(&config, "server_versions = [\"nightly\"]\n").unwrap();

    evg_matrix()
        .args(["generate", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse matrix config"));
}

#[test]
fn test_generate_unknown_matrix() {
    evg_matrix()
        .args(["generate", "--matrix", "nightly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown matrix"));
}

// ============================================================================
// evg-matrix hosts
// ============================================================================

#[test]
fn test_hosts_lists_registry() {
    evg_matrix()
        .arg("hosts")
        .assert()
        .success()
        .stdout(predicate::str::contains("rhel8"))
        .stdout(predicate::str::contains("macos-14-arm64"))
        .stdout(predicate::str::contains("SKIP_CSOT_TESTS=true"));
}

#[test]
fn test_hosts_json() {
    let output = stdout_of(&["hosts", "--json"]);
    let hosts: serde_json::Value = serde_json::from_str(&output).unwrap();

    let hosts = hosts.as_array().unwrap();
    assert_eq!(hosts.len(), 5);
    assert_eq!(hosts[2]["host"], "win32");
    assert_eq!(hosts[2]["binary_layout"]["root"], "C:/python/32");
}

// ============================================================================
// evg-matrix completions
// ============================================================================

#[test]
fn test_completions_bash() {
    evg_matrix()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("evg-matrix"));
}
