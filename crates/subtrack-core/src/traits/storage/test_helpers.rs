//! In-memory stand-in implementing both storage traits, for tests.
//!
//! Used by service and server tests that do not need a real database.
//! Insertion order is preserved so listings match the SQLite ordering.

use std::sync::Mutex;

use crate::errors::StorageError;
use crate::models::{Role, Subscription, UserRecord};

use super::{ISubscriptionStorage, IUserStorage};

#[derive(Default)]
pub struct InMemoryStorage {
    users: Mutex<Vec<UserRecord>>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().map(|u| u.len()).unwrap_or(0)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::LockPoisoned
}

impl IUserStorage for InMemoryStorage {
    fn insert_user(&self, record: &UserRecord) -> Result<(), StorageError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.iter().any(|u| u.user.email == record.user.email) {
            return Err(StorageError::UniqueViolation {
                field: "email".to_string(),
            });
        }
        users.push(record.clone());
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.user.id == id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.user.email == email).cloned())
    }

    fn list_users_by_role(&self, role: Role) -> Result<Vec<UserRecord>, StorageError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().filter(|u| u.user.role == role).cloned().collect())
    }

    fn update_user(&self, record: &UserRecord) -> Result<bool, StorageError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users
            .iter()
            .any(|u| u.user.email == record.user.email && u.user.id != record.user.id)
        {
            return Err(StorageError::UniqueViolation {
                field: "email".to_string(),
            });
        }
        match users.iter_mut().find(|u| u.user.id == record.user.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        let before = users.len();
        users.retain(|u| u.user.id != id);
        Ok(users.len() != before)
    }
}

impl ISubscriptionStorage for InMemoryStorage {
    fn insert_subscription(&self, sub: &Subscription) -> Result<(), StorageError> {
        self.subscriptions.lock().map_err(poisoned)?.push(sub.clone());
        Ok(())
    }

    fn get_subscription(&self, id: &str) -> Result<Option<Subscription>, StorageError> {
        let subs = self.subscriptions.lock().map_err(poisoned)?;
        Ok(subs.iter().find(|s| s.id == id).cloned())
    }

    fn list_subscriptions(&self) -> Result<Vec<Subscription>, StorageError> {
        Ok(self.subscriptions.lock().map_err(poisoned)?.clone())
    }

    fn update_subscription(&self, sub: &Subscription) -> Result<bool, StorageError> {
        let mut subs = self.subscriptions.lock().map_err(poisoned)?;
        match subs.iter_mut().find(|s| s.id == sub.id) {
            Some(slot) => {
                *slot = sub.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_subscription(&self, id: &str) -> Result<bool, StorageError> {
        let mut subs = self.subscriptions.lock().map_err(poisoned)?;
        let before = subs.len();
        subs.retain(|s| s.id != id);
        Ok(subs.len() != before)
    }

    fn list_renewal_dates(&self) -> Result<Vec<String>, StorageError> {
        let subs = self.subscriptions.lock().map_err(poisoned)?;
        Ok(subs.iter().map(|s| s.renewal_date.clone()).collect())
    }
}
