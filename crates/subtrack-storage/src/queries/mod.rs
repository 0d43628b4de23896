//! Row-level SQL for each collection. Every function takes a borrowed
//! `Connection`; locking is the caller's concern.

pub mod subscriptions;
pub mod users;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use subtrack_core::errors::StorageError;

/// Parse a stored RFC 3339 timestamp.
pub(crate) fn parse_timestamp(
    collection: &'static str,
    column: &str,
    raw: &str,
) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRecord {
            collection,
            details: format!("{column} `{raw}`: {e}"),
        })
}

/// Parse a stored enum label.
pub(crate) fn parse_label<T: FromStr<Err = String>>(
    collection: &'static str,
    raw: &str,
) -> Result<T, StorageError> {
    raw.parse()
        .map_err(|details| StorageError::CorruptRecord { collection, details })
}
