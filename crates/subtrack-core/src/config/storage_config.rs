//! Storage subsystem configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file. `:memory:` opens an in-memory database.
    pub path: String,
    /// Number of read-only connections kept open alongside the writer.
    pub read_pool_size: usize,
    /// SQLite busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "subtrack.db".to_string(),
            read_pool_size: 4,
            busy_timeout_ms: 5_000,
        }
    }
}

impl StorageConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
