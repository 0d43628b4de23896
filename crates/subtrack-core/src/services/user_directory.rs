//! CRUD over user accounts.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::{SubtrackError, SubtrackResult};
use crate::models::{NewUser, Role, User, UserPatch, UserRecord};
use crate::traits::{ICredentialStore, IUserStorage};

#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn IUserStorage>,
    credentials: Arc<dyn ICredentialStore>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn IUserStorage>, credentials: Arc<dyn ICredentialStore>) -> Self {
        Self { users, credentials }
    }

    pub fn storage(&self) -> &dyn IUserStorage {
        self.users.as_ref()
    }

    pub fn credentials(&self) -> &dyn ICredentialStore {
        self.credentials.as_ref()
    }

    /// Create a user. The email must not already be registered.
    pub fn register(&self, new_user: NewUser) -> SubtrackResult<User> {
        if self.users.find_user_by_email(&new_user.email)?.is_some() {
            return Err(SubtrackError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.credentials.hash_password(&new_user.password)?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            phone: new_user.phone,
            role: new_user.role,
            access_level: new_user.access_level,
            created_at: Utc::now(),
        };

        self.users.insert_user(&UserRecord {
            user: user.clone(),
            password_hash,
        })?;

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    pub fn get(&self, id: &str) -> SubtrackResult<User> {
        self.users
            .get_user(id)?
            .map(|record| record.user)
            .ok_or_else(|| SubtrackError::user_not_found(id))
    }

    pub fn find_by_email(&self, email: &str) -> SubtrackResult<Option<User>> {
        Ok(self.users.find_user_by_email(email)?.map(|record| record.user))
    }

    /// Every account with the `staff` role.
    pub fn list_staff(&self) -> SubtrackResult<Vec<User>> {
        Ok(self
            .users
            .list_users_by_role(Role::Staff)?
            .into_iter()
            .map(|record| record.user)
            .collect())
    }

    /// Apply a partial update.
    ///
    /// The existence check and the write are separate steps; a concurrent
    /// delete in between surfaces as `NotFound`.
    pub fn update(&self, id: &str, patch: UserPatch) -> SubtrackResult<User> {
        let mut record = self
            .users
            .get_user(id)?
            .ok_or_else(|| SubtrackError::user_not_found(id))?;

        if patch.is_empty() {
            return Ok(record.user);
        }

        if let Some(email) = patch.email.as_deref() {
            if email != record.user.email {
                if let Some(other) = self.users.find_user_by_email(email)? {
                    if other.user.id != id {
                        return Err(SubtrackError::Conflict(
                            "Email already registered".to_string(),
                        ));
                    }
                }
            }
        }

        patch.apply_profile(&mut record.user);
        if let Some(password) = patch.password.as_deref() {
            record.password_hash = self.credentials.hash_password(password)?;
        }

        if !self.users.update_user(&record)? {
            return Err(SubtrackError::user_not_found(id));
        }

        info!(user_id = %id, password_changed = patch.password.is_some(), "user updated");
        Ok(record.user)
    }

    pub fn delete(&self, id: &str) -> SubtrackResult<()> {
        if !self.users.delete_user(id)? {
            return Err(SubtrackError::user_not_found(id));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::{BcryptCredentialStore, MIN_BCRYPT_COST};
    use crate::models::AccessLevel;
    use crate::traits::storage::test_helpers::InMemoryStorage;

    fn directory() -> (Arc<InMemoryStorage>, UserDirectory) {
        let storage = Arc::new(InMemoryStorage::new());
        let directory = UserDirectory::new(
            storage.clone(),
            Arc::new(BcryptCredentialStore::with_cost(MIN_BCRYPT_COST)),
        );
        (storage, directory)
    }

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Pat".into(),
            email: email.into(),
            phone: "123".into(),
            password: "password1".into(),
            role,
            access_level: AccessLevel::Full,
        }
    }

    #[test]
    fn register_hashes_password() {
        let (storage, directory) = directory();
        let user = directory.register(new_user("pat@example.com", Role::Staff)).unwrap();

        let stored = storage.get_user(&user.id).unwrap().unwrap();
        assert_ne!(stored.password_hash, "password1");
        assert!(directory
            .credentials()
            .verify_password("password1", &stored.password_hash));
    }

    #[test]
    fn duplicate_email_is_conflict() {
        let (_, directory) = directory();
        directory.register(new_user("dup@example.com", Role::Staff)).unwrap();
        let err = directory
            .register(new_user("dup@example.com", Role::Admin))
            .unwrap_err();
        assert!(matches!(err, SubtrackError::Conflict(_)));
    }

    #[test]
    fn list_staff_excludes_admins() {
        let (_, directory) = directory();
        directory.register(new_user("a@example.com", Role::Admin)).unwrap();
        directory.register(new_user("s1@example.com", Role::Staff)).unwrap();
        directory.register(new_user("s2@example.com", Role::Staff)).unwrap();

        let staff = directory.list_staff().unwrap();
        assert_eq!(staff.len(), 2);
        assert!(staff.iter().all(|u| u.role == Role::Staff));
    }

    #[test]
    fn update_applies_only_present_fields() {
        let (_, directory) = directory();
        let user = directory.register(new_user("p@example.com", Role::Staff)).unwrap();

        let updated = directory
            .update(
                &user.id,
                UserPatch {
                    phone: Some("999".into()),
                    access_level: Some(AccessLevel::ViewOnly),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.phone, "999");
        assert_eq!(updated.access_level, AccessLevel::ViewOnly);
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.created_at, user.created_at);
    }

    #[test]
    fn password_update_is_hashed() {
        let (storage, directory) = directory();
        let user = directory.register(new_user("p@example.com", Role::Staff)).unwrap();
        directory
            .update(
                &user.id,
                UserPatch {
                    password: Some("new-password".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let stored = storage.get_user(&user.id).unwrap().unwrap();
        assert_ne!(stored.password_hash, "new-password");
        assert!(directory
            .credentials()
            .verify_password("new-password", &stored.password_hash));
    }

    #[test]
    fn email_change_onto_taken_address_is_conflict() {
        let (_, directory) = directory();
        directory.register(new_user("taken@example.com", Role::Staff)).unwrap();
        let user = directory.register(new_user("mine@example.com", Role::Staff)).unwrap();

        let err = directory
            .update(
                &user.id,
                UserPatch {
                    email: Some("taken@example.com".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, SubtrackError::Conflict(_)));
    }

    #[test]
    fn missing_user_is_not_found() {
        let (_, directory) = directory();
        assert!(matches!(
            directory.get("nope"),
            Err(SubtrackError::NotFound { .. })
        ));
        assert!(matches!(
            directory.update("nope", UserPatch::default()),
            Err(SubtrackError::NotFound { .. })
        ));
        assert!(matches!(
            directory.delete("nope"),
            Err(SubtrackError::NotFound { .. })
        ));
    }
}
