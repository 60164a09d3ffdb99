//! Error types for the reserva library.
//!
//! This module provides the error hierarchy shared by the validator, the
//! stores, the pipeline and the reloader, using `thiserror` for ergonomic
//! error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a reserva error.
///
/// # Examples
///
/// ```
/// use reserva::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(8)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the reserva library.
///
/// Variants fall into two families that the rest of the crate treats
/// differently: naming-policy failures ([`Error::InvalidName`]) and failures
/// of the persistence layer (see [`Error::is_store_error`]).
#[derive(Debug, Error)]
pub enum Error {
    /// A name failed the naming policy.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The offending name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A storage backend failed for a reason other than a database error.
    #[error("storage error: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },

    /// An operation was issued against a transaction that already
    /// committed or rolled back.
    #[error("transaction already finished")]
    TransactionClosed,

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or environment value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A lifecycle rule was violated (for example a reload ran twice).
    #[error("lifecycle error: {message}")]
    Lifecycle {
        /// Details about the violation.
        message: String,
    },
}

impl Error {
    /// Creates a storage error from any displayable message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns true if this error originated in the persistence layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use reserva::Error;
    ///
    /// assert!(Error::storage("disk full").is_store_error());
    /// assert!(Error::TransactionClosed.is_store_error());
    /// assert!(!Error::InvalidName {
    ///     name: "alice".into(),
    ///     reason: "lowercase".into(),
    /// }
    /// .is_store_error());
    /// ```
    #[must_use]
    pub const fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Storage { .. }
                | Self::TransactionClosed
                | Self::LockTimeout { .. }
                | Self::UnsupportedSchemaVersion { .. }
        )
    }

    /// Returns true if this error is a naming-policy failure.
    #[must_use]
    pub const fn is_invalid_name(&self) -> bool {
        matches!(self, Self::InvalidName { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = Error::InvalidName {
            name: "ayana".into(),
            reason: "must start with an uppercase letter".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid name 'ayana': must start with an uppercase letter"
        );
        assert!(err.is_invalid_name());
        assert!(!err.is_store_error());
    }

    #[test]
    fn test_store_error_classification() {
        assert!(Error::storage("boom").is_store_error());
        assert!(Error::LockTimeout { seconds: 5 }.is_store_error());
        assert!(Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2
        }
        .is_store_error());
        assert!(Error::from(rusqlite::Error::QueryReturnedNoRows).is_store_error());

        assert!(!Error::Lifecycle {
            message: "again".into()
        }
        .is_store_error());
        assert!(!Error::Validation {
            field: "concurrency".into(),
            message: "must be positive".into(),
        }
        .is_store_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_storage_display() {
        assert_eq!(
            Error::storage("lock poisoned").to_string(),
            "storage error: lock poisoned"
        );
        assert_eq!(
            Error::TransactionClosed.to_string(),
            "transaction already finished"
        );
    }
}
