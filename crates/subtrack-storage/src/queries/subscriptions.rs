//! Queries over the `subscriptions` collection.

use rusqlite::{params, Connection, OptionalExtension, Row};
use subtrack_core::errors::StorageError;
use subtrack_core::models::Subscription;

use super::{parse_label, parse_timestamp};
use crate::to_storage_err;

const COLLECTION: &str = "subscriptions";

const SELECT_COLUMNS: &str = "SELECT id, client_name, business_name, client_email, client_phone, \
     price, paid_date, renewal_date, duration, type, category, notes, status, created_by, \
     created_at, updated_at FROM subscriptions";

struct SubscriptionRow {
    id: String,
    client_name: String,
    business_name: String,
    client_email: Option<String>,
    client_phone: Option<String>,
    price: f64,
    paid_date: String,
    renewal_date: String,
    duration: String,
    subscription_type: String,
    category: String,
    notes: Option<String>,
    status: String,
    created_by: String,
    created_at: String,
    updated_at: String,
}

impl SubscriptionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            client_name: row.get(1)?,
            business_name: row.get(2)?,
            client_email: row.get(3)?,
            client_phone: row.get(4)?,
            price: row.get(5)?,
            paid_date: row.get(6)?,
            renewal_date: row.get(7)?,
            duration: row.get(8)?,
            subscription_type: row.get(9)?,
            category: row.get(10)?,
            notes: row.get(11)?,
            status: row.get(12)?,
            created_by: row.get(13)?,
            created_at: row.get(14)?,
            updated_at: row.get(15)?,
        })
    }

    fn into_subscription(self) -> Result<Subscription, StorageError> {
        Ok(Subscription {
            duration: parse_label(COLLECTION, &self.duration)?,
            subscription_type: parse_label(COLLECTION, &self.subscription_type)?,
            category: parse_label(COLLECTION, &self.category)?,
            status: parse_label(COLLECTION, &self.status)?,
            created_at: parse_timestamp(COLLECTION, "created_at", &self.created_at)?,
            updated_at: parse_timestamp(COLLECTION, "updated_at", &self.updated_at)?,
            id: self.id,
            client_name: self.client_name,
            business_name: self.business_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            price: self.price,
            paid_date: self.paid_date,
            renewal_date: self.renewal_date,
            notes: self.notes,
            created_by: self.created_by,
        })
    }
}

pub fn insert_subscription(conn: &Connection, sub: &Subscription) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO subscriptions (
            id, client_name, business_name, client_email, client_phone, price,
            paid_date, renewal_date, duration, type, category, notes, status,
            created_by, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            sub.id,
            sub.client_name,
            sub.business_name,
            sub.client_email,
            sub.client_phone,
            sub.price,
            sub.paid_date,
            sub.renewal_date,
            sub.duration.as_str(),
            sub.subscription_type.as_str(),
            sub.category.as_str(),
            sub.notes,
            sub.status.as_str(),
            sub.created_by,
            sub.created_at.to_rfc3339(),
            sub.updated_at.to_rfc3339(),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn get_subscription(conn: &Connection, id: &str) -> Result<Option<Subscription>, StorageError> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id],
        SubscriptionRow::from_row,
    )
    .optional()
    .map_err(to_storage_err)?
    .map(SubscriptionRow::into_subscription)
    .transpose()
}

/// Every subscription, in insertion order.
pub fn list_subscriptions(conn: &Connection) -> Result<Vec<Subscription>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("{SELECT_COLUMNS} ORDER BY rowid"))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], SubscriptionRow::from_row)
        .map_err(to_storage_err)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)?;
    rows.into_iter().map(SubscriptionRow::into_subscription).collect()
}

/// Overwrite every mutable column; `created_by` and `created_at` stay as inserted.
pub fn update_subscription(conn: &Connection, sub: &Subscription) -> Result<bool, StorageError> {
    let changed = conn
        .execute(
            "UPDATE subscriptions SET
                client_name = ?2, business_name = ?3, client_email = ?4, client_phone = ?5,
                price = ?6, paid_date = ?7, renewal_date = ?8, duration = ?9, type = ?10,
                category = ?11, notes = ?12, status = ?13, updated_at = ?14
             WHERE id = ?1",
            params![
                sub.id,
                sub.client_name,
                sub.business_name,
                sub.client_email,
                sub.client_phone,
                sub.price,
                sub.paid_date,
                sub.renewal_date,
                sub.duration.as_str(),
                sub.subscription_type.as_str(),
                sub.category.as_str(),
                sub.notes,
                sub.status.as_str(),
                sub.updated_at.to_rfc3339(),
            ],
        )
        .map_err(to_storage_err)?;
    Ok(changed > 0)
}

pub fn delete_subscription(conn: &Connection, id: &str) -> Result<bool, StorageError> {
    let changed = conn
        .execute("DELETE FROM subscriptions WHERE id = ?1", params![id])
        .map_err(to_storage_err)?;
    Ok(changed > 0)
}

/// Only the `renewal_date` column, for dashboard aggregation.
pub fn list_renewal_dates(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare("SELECT renewal_date FROM subscriptions ORDER BY rowid")
        .map_err(to_storage_err)?;
    let dates = stmt
        .query_map([], |row| row.get(0))
        .map_err(to_storage_err)?
        .collect::<rusqlite::Result<Vec<String>>>()
        .map_err(to_storage_err)?;
    Ok(dates)
}
