//! Queries over the `users` collection.

use rusqlite::{params, Connection, OptionalExtension, Row};
use subtrack_core::errors::StorageError;
use subtrack_core::models::{Role, User, UserRecord};

use super::{parse_label, parse_timestamp};
use crate::to_storage_err;

const COLLECTION: &str = "users";

const SELECT_COLUMNS: &str =
    "SELECT id, name, email, phone, role, access_level, password_hash, created_at FROM users";

/// Raw column values, converted after the row borrow ends.
struct UserRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    role: String,
    access_level: String,
    password_hash: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            role: row.get(4)?,
            access_level: row.get(5)?,
            password_hash: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<UserRecord, StorageError> {
        Ok(UserRecord {
            user: User {
                role: parse_label(COLLECTION, &self.role)?,
                access_level: parse_label(COLLECTION, &self.access_level)?,
                created_at: parse_timestamp(COLLECTION, "created_at", &self.created_at)?,
                id: self.id,
                name: self.name,
                email: self.email,
                phone: self.phone,
            },
            password_hash: self.password_hash,
        })
    }
}

pub fn insert_user(conn: &Connection, record: &UserRecord) -> Result<(), StorageError> {
    let user = &record.user;
    conn.execute(
        "INSERT INTO users (id, name, email, phone, role, access_level, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user.id,
            user.name,
            user.email,
            user.phone,
            user.role.as_str(),
            user.access_level.as_str(),
            record.password_hash,
            user.created_at.to_rfc3339(),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &str) -> Result<Option<UserRecord>, StorageError> {
    query_one(conn, &format!("{SELECT_COLUMNS} WHERE id = ?1"), id)
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRecord>, StorageError> {
    query_one(conn, &format!("{SELECT_COLUMNS} WHERE email = ?1"), email)
}

/// Users with `role`, in insertion order.
pub fn list_users_by_role(conn: &Connection, role: Role) -> Result<Vec<UserRecord>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("{SELECT_COLUMNS} WHERE role = ?1 ORDER BY rowid"))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![role.as_str()], UserRow::from_row)
        .map_err(to_storage_err)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)?;
    rows.into_iter().map(UserRow::into_record).collect()
}

/// Overwrite every mutable column. Returns false if no row has `id`.
pub fn update_user(conn: &Connection, record: &UserRecord) -> Result<bool, StorageError> {
    let user = &record.user;
    let changed = conn
        .execute(
            "UPDATE users
             SET name = ?2, email = ?3, phone = ?4, role = ?5, access_level = ?6, password_hash = ?7
             WHERE id = ?1",
            params![
                user.id,
                user.name,
                user.email,
                user.phone,
                user.role.as_str(),
                user.access_level.as_str(),
                record.password_hash,
            ],
        )
        .map_err(to_storage_err)?;
    Ok(changed > 0)
}

pub fn delete_user(conn: &Connection, id: &str) -> Result<bool, StorageError> {
    let changed = conn
        .execute("DELETE FROM users WHERE id = ?1", params![id])
        .map_err(to_storage_err)?;
    Ok(changed > 0)
}

pub fn count_users(conn: &Connection) -> Result<usize, StorageError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(count as usize)
}

fn query_one(conn: &Connection, sql: &str, key: &str) -> Result<Option<UserRecord>, StorageError> {
    conn.query_row(sql, params![key], UserRow::from_row)
        .optional()
        .map_err(to_storage_err)?
        .map(UserRow::into_record)
        .transpose()
}
