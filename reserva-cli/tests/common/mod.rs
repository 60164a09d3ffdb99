//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Output parsing helpers

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into a test.
const HOST_VARIABLES: [&str; 8] = [
    "RESERVA_DATA_DIR",
    "RESERVA_BUSY_TIMEOUT",
    "RESERVA_NAMES",
    "RESERVA_VALIDATION",
    "RESERVA_CONCURRENCY",
    "RESERVA_TRANSACTIONAL",
    "RESERVA_MAXIMUM_LOCK_WAIT_SECONDS",
    "RESERVA_OUTPUT_FORMAT",
];

/// The names `reload` saves when nothing else is configured.
#[allow(dead_code)]
pub const DEFAULT_SEED: [&str; 8] = [
    "Akash", "Shikha", "Ayana", "Netra", "Megha", "Rajveer", "Mahee", "Surya",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the reserva data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; reserva creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("reserva-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a command builder without `--data-dir`.
    ///
    /// The working directory is the temporary directory and host
    /// `RESERVA_*` variables are cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("reserva").expect("Failed to find reserva binary");
        cmd.current_dir(&self.temp_path);
        for variable in HOST_VARIABLES {
            cmd.env_remove(variable);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run `reserva reload` with the given extra arguments, asserting success.
    pub fn reload(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("reload")
            .args(args)
            .output()
            .expect("Failed to run reload command");

        assert!(
            output.status.success(),
            "Reload failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Run `reserva list --format json` and return the stored names in id order.
    pub fn list_names(&self) -> Vec<String> {
        let output = self
            .command()
            .args(["list", "--format", "json"])
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        parse_names(&String::from_utf8_lossy(&output.stdout))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the `name` fields from a JSON reservation array.
#[allow(dead_code)]
pub fn parse_names(json: &str) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_str(json).expect("Output is not valid JSON");
    value
        .as_array()
        .expect("Output is not a JSON array")
        .iter()
        .map(|entry| {
            entry["name"]
                .as_str()
                .expect("Reservation without a name")
                .to_string()
        })
        .collect()
}

/// Sort a list of names for order-insensitive comparison.
#[allow(dead_code)]
pub fn sorted(names: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    names.sort();
    names
}
