//! Persistence traits for the `users` and `subscriptions` collections.
//!
//! Records are keyed by their opaque string `id`, never by the backend's
//! internal row identity. Update and delete return `false` when no record
//! matched, letting callers surface `NotFound`.

pub mod test_helpers;

use std::sync::Arc;

use crate::errors::StorageError;
use crate::models::{Role, Subscription, UserRecord};

/// User collection operations.
pub trait IUserStorage: Send + Sync {
    /// Insert a new user. Fails with `UniqueViolation { field: "email" }` on a duplicate email.
    fn insert_user(&self, record: &UserRecord) -> Result<(), StorageError>;

    fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StorageError>;

    fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError>;

    /// All users with `role`, oldest first.
    fn list_users_by_role(&self, role: Role) -> Result<Vec<UserRecord>, StorageError>;

    /// Overwrite the stored record with the same id.
    fn update_user(&self, record: &UserRecord) -> Result<bool, StorageError>;

    fn delete_user(&self, id: &str) -> Result<bool, StorageError>;
}

/// Subscription collection operations.
pub trait ISubscriptionStorage: Send + Sync {
    fn insert_subscription(&self, sub: &Subscription) -> Result<(), StorageError>;

    fn get_subscription(&self, id: &str) -> Result<Option<Subscription>, StorageError>;

    /// All subscriptions, oldest first.
    fn list_subscriptions(&self) -> Result<Vec<Subscription>, StorageError>;

    /// Overwrite the stored record with the same id.
    fn update_subscription(&self, sub: &Subscription) -> Result<bool, StorageError>;

    fn delete_subscription(&self, id: &str) -> Result<bool, StorageError>;

    /// Raw renewal date of every subscription, for dashboard aggregation.
    fn list_renewal_dates(&self) -> Result<Vec<String>, StorageError>;
}

// ─── Arc blanket impls ───────────────────────────────────────────────

impl<T: IUserStorage + ?Sized> IUserStorage for Arc<T> {
    fn insert_user(&self, record: &UserRecord) -> Result<(), StorageError> {
        (**self).insert_user(record)
    }
    fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StorageError> {
        (**self).get_user(id)
    }
    fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        (**self).find_user_by_email(email)
    }
    fn list_users_by_role(&self, role: Role) -> Result<Vec<UserRecord>, StorageError> {
        (**self).list_users_by_role(role)
    }
    fn update_user(&self, record: &UserRecord) -> Result<bool, StorageError> {
        (**self).update_user(record)
    }
    fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        (**self).delete_user(id)
    }
}

impl<T: ISubscriptionStorage + ?Sized> ISubscriptionStorage for Arc<T> {
    fn insert_subscription(&self, sub: &Subscription) -> Result<(), StorageError> {
        (**self).insert_subscription(sub)
    }
    fn get_subscription(&self, id: &str) -> Result<Option<Subscription>, StorageError> {
        (**self).get_subscription(id)
    }
    fn list_subscriptions(&self) -> Result<Vec<Subscription>, StorageError> {
        (**self).list_subscriptions()
    }
    fn update_subscription(&self, sub: &Subscription) -> Result<bool, StorageError> {
        (**self).update_subscription(sub)
    }
    fn delete_subscription(&self, id: &str) -> Result<bool, StorageError> {
        (**self).delete_subscription(id)
    }
    fn list_renewal_dates(&self) -> Result<Vec<String>, StorageError> {
        (**self).list_renewal_dates()
    }
}
