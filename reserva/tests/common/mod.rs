//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixtures for testing the
//! reserva library against its SQLite store.

use reserva::database::{DatabaseConfig, SqliteStore};
use reserva::Reservation;
use tempfile::TempDir;

/// Seed names used across integration tests.
#[allow(dead_code)]
pub const SEED: [&str; 8] = [
    "Akash", "Shikha", "Ayana", "Netra", "Megha", "Rajveer", "Mahee", "Surya",
];

/// Opens a SQLite store in a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for as long as the store is used.
#[allow(dead_code)]
pub fn open_test_store() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
    (dir, store)
}

/// Returns the names of `records`, sorted, for multiset comparison.
#[allow(dead_code)]
pub fn sorted_names(records: &[Reservation]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|r| r.name().to_string()).collect();
    names.sort();
    names
}

/// Returns `names` as owned strings, sorted.
#[allow(dead_code)]
pub fn sorted(names: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = names.iter().map(ToString::to_string).collect();
    names.sort();
    names
}
