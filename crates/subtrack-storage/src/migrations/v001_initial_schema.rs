//! v001: `users` and `subscriptions` collections.

use rusqlite::Connection;
use subtrack_core::errors::StorageError;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE users (
            id            TEXT NOT NULL UNIQUE,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL,
            phone         TEXT NOT NULL,
            role          TEXT NOT NULL,
            access_level  TEXT NOT NULL DEFAULT 'full',
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE UNIQUE INDEX idx_users_email ON users(email);

        CREATE TABLE subscriptions (
            id            TEXT NOT NULL UNIQUE,
            client_name   TEXT NOT NULL,
            business_name TEXT NOT NULL,
            client_email  TEXT,
            client_phone  TEXT,
            price         REAL NOT NULL,
            paid_date     TEXT NOT NULL,
            renewal_date  TEXT NOT NULL,
            duration      TEXT NOT NULL,
            type          TEXT NOT NULL,
            category      TEXT NOT NULL,
            notes         TEXT,
            status        TEXT NOT NULL,
            created_by    TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );
        ",
    )
    .map_err(to_storage_err)
}
