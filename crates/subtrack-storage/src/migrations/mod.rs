//! Forward-only schema migrations, each applied in its own transaction.

mod v001_initial_schema;
mod v002_lookup_indexes;

use chrono::Utc;
use rusqlite::Connection;
use subtrack_core::errors::StorageError;
use tracing::{debug, info};

use crate::to_storage_err;

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

type MigrationFn = fn(&Connection) -> Result<(), StorageError>;

const MIGRATIONS: [(u32, &str, MigrationFn); 2] = [
    (1, "initial_schema", v001_initial_schema::migrate),
    (2, "lookup_indexes", v002_lookup_indexes::migrate),
];

/// Current schema version; 0 if the `schema_version` table doesn't exist yet.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    let exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(to_storage_err)?;

    if !exists {
        return Ok(0);
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(to_storage_err)
}

/// Run all pending migrations. Returns how many were applied.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );",
    )
    .map_err(to_storage_err)?;

    let current = current_version(conn)?;
    if current >= LATEST_VERSION {
        debug!("database schema is up to date (v{current})");
        return Ok(0);
    }

    info!(from = current, to = LATEST_VERSION, "running schema migrations");

    let mut applied = 0;
    for (version, name, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }

        let failed = |message: String| StorageError::MigrationFailed { version, message };

        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| failed(e.to_string()))?;

        let result = migrate(conn).and_then(|()| {
            conn.execute(
                "INSERT INTO schema_version (version, name, applied_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![version, name, Utc::now().to_rfc3339()],
            )
            .map(|_| ())
            .map_err(to_storage_err)
        });

        match result {
            Ok(()) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| failed(e.to_string()))?;
                debug!(version, name, "migration applied");
                applied += 1;
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(failed(e.to_string()));
            }
        }
    }

    Ok(applied)
}
