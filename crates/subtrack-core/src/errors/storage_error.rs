//! Storage-layer errors for SQLite operations.

use super::error_code::{self, SubtrackErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Duplicate value for unique field `{field}`")]
    UniqueViolation { field: String },

    #[error("Corrupt record in `{collection}`: {details}")]
    CorruptRecord {
        collection: &'static str,
        details: String,
    },

    #[error("Connection lock poisoned")]
    LockPoisoned,
}

impl SubtrackErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::UniqueViolation { .. } => error_code::CONFLICT,
            Self::CorruptRecord { .. } => error_code::CORRUPT_RECORD,
            _ => error_code::STORAGE_ERROR,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
