//! `StorageEngine`: the SQLite implementation of both storage traits.
//!
//! Reads go through `with_reader()`, writes through `with_writer()`. Nothing
//! outside this crate touches a raw `&Connection`.

use std::path::Path;

use subtrack_core::config::StorageConfig;
use subtrack_core::errors::StorageError;
use subtrack_core::models::{Role, Subscription, UserRecord};
use subtrack_core::traits::{ISubscriptionStorage, IUserStorage};

use crate::connection::DatabaseManager;
use crate::{migrations, queries};

pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a file-backed engine at `path`. Runs migrations and applies pragmas.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path, config)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    /// Open whatever `config.path` names; `:memory:` gives an in-memory engine.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if config.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(&config.path), config)
        }
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    pub fn schema_version(&self) -> Result<u32, StorageError> {
        self.db.with_reader(migrations::current_version)
    }

    pub fn user_count(&self) -> Result<usize, StorageError> {
        self.db.with_reader(queries::users::count_users)
    }

    /// Raw read access for operations not covered by a trait method.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access for operations not covered by a trait method.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }
}

impl IUserStorage for StorageEngine {
    fn insert_user(&self, record: &UserRecord) -> Result<(), StorageError> {
        self.db
            .with_writer(|conn| queries::users::insert_user(conn, record))
    }

    fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StorageError> {
        self.db.with_reader(|conn| queries::users::get_user(conn, id))
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        self.db
            .with_reader(|conn| queries::users::find_user_by_email(conn, email))
    }

    fn list_users_by_role(&self, role: Role) -> Result<Vec<UserRecord>, StorageError> {
        self.db
            .with_reader(|conn| queries::users::list_users_by_role(conn, role))
    }

    fn update_user(&self, record: &UserRecord) -> Result<bool, StorageError> {
        self.db
            .with_writer(|conn| queries::users::update_user(conn, record))
    }

    fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        self.db.with_writer(|conn| queries::users::delete_user(conn, id))
    }
}

impl ISubscriptionStorage for StorageEngine {
    fn insert_subscription(&self, sub: &Subscription) -> Result<(), StorageError> {
        self.db
            .with_writer(|conn| queries::subscriptions::insert_subscription(conn, sub))
    }

    fn get_subscription(&self, id: &str) -> Result<Option<Subscription>, StorageError> {
        self.db
            .with_reader(|conn| queries::subscriptions::get_subscription(conn, id))
    }

    fn list_subscriptions(&self) -> Result<Vec<Subscription>, StorageError> {
        self.db.with_reader(queries::subscriptions::list_subscriptions)
    }

    fn update_subscription(&self, sub: &Subscription) -> Result<bool, StorageError> {
        self.db
            .with_writer(|conn| queries::subscriptions::update_subscription(conn, sub))
    }

    fn delete_subscription(&self, id: &str) -> Result<bool, StorageError> {
        self.db
            .with_writer(|conn| queries::subscriptions::delete_subscription(conn, id))
    }

    fn list_renewal_dates(&self) -> Result<Vec<String>, StorageError> {
        self.db.with_reader(queries::subscriptions::list_renewal_dates)
    }
}
