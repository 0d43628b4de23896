//! v002: indexes for staff listing and renewal scans.

use rusqlite::Connection;
use subtrack_core::errors::StorageError;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE INDEX idx_users_role ON users(role);
        CREATE INDEX idx_subscriptions_renewal_date ON subscriptions(renewal_date);
        CREATE INDEX idx_subscriptions_created_by ON subscriptions(created_by);
        ",
    )
    .map_err(to_storage_err)
}
