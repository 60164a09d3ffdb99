//! Database connection management.
//!
//! This module provides [`SqliteStore`], the SQLite-backed reservation
//! store, with proper initialization and PRAGMA settings.

use std::sync::Arc;
use std::time::Duration;

use rusqlite::{Connection, ErrorCode, OpenFlags};
use tokio::sync::Mutex;

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A SQLite-backed reservation store.
///
/// The store owns a single connection guarded by an async mutex. Each store
/// call locks it for the duration of one statement; a transaction keeps it
/// locked until commit or rollback, so no other caller observes a
/// transaction's intermediate state.
///
/// # Examples
///
/// ```no_run
/// use reserva::database::{DatabaseConfig, SqliteStore};
///
/// let config = DatabaseConfig::new("/tmp/reserva.db");
/// let store = SqliteStore::open(config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pub(super) conn: Arc<Mutex<Connection>>,
    config: DatabaseConfig,
}

impl SqliteStore {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Configure busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        Self::prepare(conn, config)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema cannot be set up.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn, DatabaseConfig::new(":memory:"))
    }

    fn prepare(conn: Connection, config: DatabaseConfig) -> Result<Self> {
        // PRAGMA journal_mode returns a row, so it goes through query_row
        if !config.read_only {
            let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            log::debug!("journal mode for {}: {mode}", config.path.display());
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }
        conn.busy_timeout(config.busy_timeout)?;

        if !config.read_only {
            super::migrations::check_schema_compatibility(&conn)?;
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    /// Returns the configuration this store was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Runs `f` against the connection while holding the store lock.
    pub(super) async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send,
        T: Send,
    {
        let conn = self.conn.lock().await;
        f(&*conn).map_err(|e| classify(e, self.config.busy_timeout))
    }
}

/// Turns SQLite busy/locked failures into [`Error::LockTimeout`].
pub(super) fn classify(err: Error, busy_timeout: Duration) -> Error {
    match err {
        Error::Database(rusqlite::Error::SqliteFailure(ref failure, _))
            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            Error::LockTimeout {
                seconds: busy_timeout.as_secs(),
            }
        }
        other => other,
    }
}
