//! Integration tests for the changetrack CLI
//!
//! Runs the built binary against API versions laid out in temp directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn changetrack_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_changetrack"))
}

/// Run changetrack with the given args in the specified directory
fn run_changetrack(dir: &Path, args: &[&str]) -> Output {
    changetrack_binary()
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute changetrack")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

const ACCOUNT_V1: &str = r#"
namespace Bank
{
    public class Account
    {
        public decimal Balance;

        public void Deposit(decimal amount) { }
    }
}
"#;

/// Balance becomes private: breaking.
const ACCOUNT_BREAKING: &str = r#"
namespace Bank
{
    public class Account
    {
        private decimal Balance;

        public void Deposit(decimal amount) { }
    }
}
"#;

/// Withdraw is added: feature.
const ACCOUNT_FEATURE: &str = r#"
namespace Bank
{
    public class Account
    {
        public decimal Balance;

        public void Deposit(decimal amount) { }
        public void Withdraw(decimal amount) { }
    }
}
"#;

/// Creates `v1/` and `v2/` trees and returns their names.
fn setup_versions(dir: &Path, old: &str, new: &str) {
    write_file(dir, "v1/Account.cs", old);
    write_file(dir, "v2/Account.cs", new);
}

// ============================================================================
// Compare Command Tests
// ============================================================================

#[test]
fn test_compare_breaking_change() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_BREAKING);

    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "v2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let stdout_str = stdout(&output);
    assert!(stdout_str.contains("BREAKING"));
    assert!(stdout_str.contains(
        "Field 'Bank.Account.Balance' has changed access modifiers from 'public' to 'private'"
    ));
}

#[test]
fn test_compare_identical_versions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_V1);

    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "v2"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No API changes detected."));
}

#[test]
fn test_compare_single_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_file(temp_dir.path(), "Old.cs", ACCOUNT_V1);
    write_file(temp_dir.path(), "New.cs", ACCOUNT_FEATURE);

    let output = run_changetrack(temp_dir.path(), &["compare", "Old.cs", "New.cs"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Method 'Bank.Account.Withdraw' has been added"));
}

#[test]
fn test_compare_json_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_FEATURE);

    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "v2", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("Output should be valid JSON");
    assert_eq!(json["change_type"], "Feature");
    assert_eq!(json["old_files"], 1);
    assert_eq!(json["summary"]["feature"], 1);
    assert_eq!(
        json["results"][0]["new_item"]["full_name"],
        "Bank.Account.Withdraw"
    );
}

#[test]
fn test_compare_markdown_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_BREAKING);

    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--format", "markdown"],
    );
    assert!(output.status.success());

    let stdout_str = stdout(&output);
    assert!(stdout_str.starts_with("# API change report"));
    assert!(stdout_str.contains("## Breaking changes"));
    assert!(stdout_str.contains("`Bank.Account.Balance`"));
}

#[test]
fn test_fail_on_breaking() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_BREAKING);

    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--fail-on", "breaking"],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_fail_on_breaking_passes_features() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_FEATURE);

    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--fail-on", "breaking"],
    );
    assert!(output.status.success());

    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--fail-on", "feature"],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_file_sets_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_BREAKING);
    write_file(
        temp_dir.path(),
        ".changetrack.toml",
        "[compare]\nfail_on = \"breaking\"\n\n[output]\nformat = \"json\"\n",
    );

    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "v2"]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("Config format should apply");
    assert_eq!(json["change_type"], "Breaking");

    // Flags override the file
    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--fail-on", "none", "--format", "table"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("COMPARE:"));
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_BREAKING);
    write_file(temp_dir.path(), ".changetrack.toml", "[compare\nnot toml");

    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "v2"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Failed to parse .changetrack.toml"));
}

#[test]
fn test_ignore_files_are_honoured() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_V1);
    write_file(
        temp_dir.path(),
        "v2/Generated/Extra.cs",
        "namespace Bank { public class Extra { } }",
    );
    write_file(temp_dir.path(), "v2/.changetrackignore", "Generated/\n");

    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "v2"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No API changes detected."));
}

#[test]
fn test_attribute_modes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(
        temp_dir.path(),
        "public class Dto { [Obsolete(\"old\")] public int Id; }",
        "public class Dto { public int Id; }",
    );

    // Obsolete is not a serialization attribute
    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "v2", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["change_type"], "None");

    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--format", "json", "--attribute-pattern", "^Obsolete$"],
    );
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["change_type"], "Breaking");

    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--format", "json", "--attributes", "skip", "--attribute-pattern", "^Obsolete$"],
    );
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["change_type"], "None");
}

#[test]
fn test_invalid_attribute_pattern_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_V1);

    let output = run_changetrack(
        temp_dir.path(),
        &["compare", "v1", "v2", "--attribute-pattern", "("],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid --attribute-pattern"));
}

#[test]
fn test_nonexistent_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_file(temp_dir.path(), "v1/Account.cs", ACCOUNT_V1);

    let output = run_changetrack(temp_dir.path(), &["compare", "v1", "missing"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to scan"));
}

#[test]
fn test_compare_alias() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_V1);

    let output = run_changetrack(temp_dir.path(), &["c", "v1", "v2"]);
    assert!(output.status.success());
}

// ============================================================================
// Global Flags
// ============================================================================

#[test]
fn test_help_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_changetrack(temp_dir.path(), &["--help"]);

    assert!(output.status.success(), "--help should succeed");
    let stdout_str = stdout(&output);
    assert!(stdout_str.contains("compare"));
    assert!(stdout_str.contains("completions"));
}

#[test]
fn test_no_command_prints_help() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_changetrack(temp_dir.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}

#[test]
fn test_version_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_changetrack(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("changetrack"));
}

#[test]
fn test_verbose_flag_logs_to_stderr() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_FEATURE);

    let output = run_changetrack(
        temp_dir.path(),
        &["--verbose", "compare", "v1", "v2", "--format", "json"],
    );
    assert!(output.status.success());
    assert!(stderr(&output).contains("Comparing API surfaces"));
    // stdout stays machine readable
    assert!(serde_json::from_str::<serde_json::Value>(&stdout(&output)).is_ok());
}

#[test]
fn test_quiet_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    setup_versions(temp_dir.path(), ACCOUNT_V1, ACCOUNT_FEATURE);
    write_file(temp_dir.path(), ".changetrack.toml", "[compare\nbroken");

    let output = run_changetrack(temp_dir.path(), &["--quiet", "compare", "v1", "v2"]);
    assert!(output.status.success());
    assert!(stderr(&output).is_empty(), "stderr: {}", stderr(&output));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_changetrack(temp_dir.path(), &["completions", "bash"]);

    assert!(output.status.success());
    let stdout_str = stdout(&output);
    assert!(stdout_str.contains("changetrack"));
    assert!(stdout_str.contains("compare"));
}

#[test]
fn test_completions_instructions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_changetrack(temp_dir.path(), &["completions", "zsh", "--instructions"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("changetrack completions zsh"));
}
