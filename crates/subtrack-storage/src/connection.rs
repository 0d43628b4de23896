//! One write connection plus a small pool of read-only connections.
//!
//! Every access goes through `with_reader` / `with_writer`, which hold the
//! connection's lock only for the closure's duration, so it is released on
//! every exit path. In-memory databases have no read pool (each connection
//! would be a separate database) and route reads through the writer.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use subtrack_core::config::StorageConfig;
use subtrack_core::errors::StorageError;
use tracing::{debug, info};

use crate::migrations;
use crate::to_storage_err;

pub struct DatabaseManager {
    path: Option<PathBuf>,
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
}

impl DatabaseManager {
    /// Open (creating if needed) a file-backed database and run migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::SqliteError {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let writer = Connection::open(path).map_err(to_storage_err)?;
        apply_write_pragmas(&writer, busy_timeout, true)?;
        migrations::run_migrations(&writer)?;

        let mut readers = Vec::with_capacity(config.read_pool_size);
        for _ in 0..config.read_pool_size {
            let reader = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX
                    | OpenFlags::SQLITE_OPEN_URI,
            )
            .map_err(to_storage_err)?;
            reader.busy_timeout(busy_timeout).map_err(to_storage_err)?;
            readers.push(Mutex::new(reader));
        }

        info!(
            path = %path.display(),
            readers = readers.len(),
            "database opened"
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            writer: Mutex::new(writer),
            readers,
            next_reader: AtomicUsize::new(0),
        })
    }

    /// Open an in-memory database (tests, ephemeral runs).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(to_storage_err)?;
        apply_write_pragmas(&writer, Duration::from_millis(5_000), false)?;
        migrations::run_migrations(&writer)?;
        debug!("in-memory database opened");

        Ok(Self {
            path: None,
            writer: Mutex::new(writer),
            readers: Vec::new(),
            next_reader: AtomicUsize::new(0),
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against a read connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }
        let conn = self.acquire_reader()?;
        f(&conn)
    }

    /// Run `f` against the single write connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.writer.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&conn)
    }

    /// Round-robin over the pool, taking the first idle reader, or waiting
    /// on the round-robin pick if all are busy.
    fn acquire_reader(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        let start = self.next_reader.fetch_add(1, Ordering::Relaxed);
        let len = self.readers.len();

        for offset in 0..len {
            if let Ok(guard) = self.readers[(start + offset) % len].try_lock() {
                return Ok(guard);
            }
        }

        self.readers[start % len]
            .lock()
            .map_err(|_| StorageError::LockPoisoned)
    }
}

fn apply_write_pragmas(
    conn: &Connection,
    busy_timeout: Duration,
    wal: bool,
) -> Result<(), StorageError> {
    conn.busy_timeout(busy_timeout).map_err(to_storage_err)?;
    if wal {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(to_storage_err)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(to_storage_err)?;
    }
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(to_storage_err)?;
    Ok(())
}
