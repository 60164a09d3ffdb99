//! Database schema definitions and SQL constants.
//!
//! This module contains the SQL table definitions, indices, and statements
//! used by the SQLite reservation store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// `AUTOINCREMENT` keeps ids from being reused after rows are deleted, so a
/// reload always hands out fresh ids.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )";

/// SQL statement to create an index on the name column.
///
/// This index backs `find_by_name`.
pub const CREATE_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_name ON reservations(name)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

pub(super) const INSERT_RESERVATION: &str = "INSERT INTO reservations (name) VALUES (?)";

pub(super) const DELETE_ALL_RESERVATIONS: &str = "DELETE FROM reservations";

pub(super) const DELETE_RESERVATION_BY_ID: &str = "DELETE FROM reservations WHERE id = ?";

pub(super) const SELECT_RESERVATION_BY_ID: &str = "SELECT id, name FROM reservations WHERE id = ?";

pub(super) const LIST_RESERVATIONS: &str = "SELECT id, name FROM reservations ORDER BY id";

pub(super) const SELECT_BY_NAME: &str =
    "SELECT id, name FROM reservations WHERE name = ? ORDER BY id";

pub(super) const COUNT_RESERVATIONS: &str = "SELECT COUNT(*) FROM reservations";
