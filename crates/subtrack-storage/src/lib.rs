//! # subtrack-storage
//!
//! SQLite persistence layer for subtrack.
//! WAL mode, write-serialized + read-pooled, forward-only migrations.
//! Holds the `users` and `subscriptions` collections as flat rows keyed by
//! a string `id`, with timestamps stored as RFC 3339 text.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use engine::StorageEngine;

use rusqlite::ErrorCode;
use subtrack_core::errors::StorageError;

/// Convert a rusqlite error into a `StorageError`, recognising busy and
/// unique-constraint failures.
pub fn to_storage_err(err: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(ffi_err, message) = &err {
        match ffi_err.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => return StorageError::DbBusy,
            ErrorCode::ConstraintViolation => {
                let message = message.as_deref().unwrap_or_default();
                if let Some(column) = message.strip_prefix("UNIQUE constraint failed: ") {
                    let field = column
                        .split('.')
                        .next_back()
                        .unwrap_or(column)
                        .to_string();
                    return StorageError::UniqueViolation { field };
                }
            }
            _ => {}
        }
    }
    StorageError::SqliteError {
        message: err.to_string(),
    }
}
