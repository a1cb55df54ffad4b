//! Registry database location, bootstrap and schema migrations.
//!
//! # Responsibility
//! - Decide which file backs the registry (`CAR_REGISTRY_DB_PATH` or the
//!   default file in the working directory).
//! - Open and configure the registry connection.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Registry rows are not read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Environment variable overriding the registry file location.
pub const DB_PATH_ENV: &str = "CAR_REGISTRY_DB_PATH";
/// Registry file used when no override is given, relative to the working
/// directory.
pub const DEFAULT_DB_FILE_NAME: &str = "car_ownership_registry.db";

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening or upgrading the registry file.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with a schema this one cannot read.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "registry storage error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "registry file uses schema version {db_version}; this build reads up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Resolves the registry file from an optional override.
///
/// A missing or blank override selects `DEFAULT_DB_FILE_NAME`.
pub fn resolve_db_path(override_path: Option<&str>) -> PathBuf {
    match override_path.map(str::trim) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DB_FILE_NAME),
    }
}

/// Resolves the registry file from `CAR_REGISTRY_DB_PATH`.
pub fn db_path_from_env() -> PathBuf {
    resolve_db_path(std::env::var(DB_PATH_ENV).ok().as_deref())
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path, DbError, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn blank_override_falls_back_to_default_file() {
        assert_eq!(resolve_db_path(None), PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(
            resolve_db_path(Some("  ")),
            PathBuf::from(DEFAULT_DB_FILE_NAME)
        );
        assert!(PathBuf::from(DEFAULT_DB_FILE_NAME).is_relative());
    }

    #[test]
    fn override_is_trimmed() {
        assert_eq!(
            resolve_db_path(Some(" /data/cars.db\n")),
            PathBuf::from("/data/cars.db")
        );
    }

    #[test]
    fn newer_schema_message_names_both_versions() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 4,
            latest_supported: 1,
        };
        let message = err.to_string();
        assert!(message.contains('4') && message.contains('1'));
    }
}
