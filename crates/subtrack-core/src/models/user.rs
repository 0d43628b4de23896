//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

labelled_enum! {
    /// Account role. Only `Admin` passes admin-gated operations.
    pub enum Role {
        Admin => "admin",
        Staff => "staff",
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Staff
    }
}

labelled_enum! {
    /// Secondary permission flag. Stored and returned, not enforced.
    pub enum AccessLevel {
        Full => "full",
        ViewOnly => "view_only",
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        AccessLevel::Full
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub access_level: AccessLevel,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user as persisted: the public record plus its password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Registration payload.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub access_level: AccessLevel,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("role", &self.role)
            .field("access_level", &self.access_level)
            .finish_non_exhaustive()
    }
}

/// Partial update for a user. `None` fields are left untouched.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Plaintext; hashed before it reaches storage.
    pub password: Option<String>,
    pub role: Option<Role>,
    pub access_level: Option<AccessLevel>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.access_level.is_none()
    }

    /// Apply every non-password field to `user`. The password is handled by
    /// the directory since it must be hashed first.
    pub fn apply_profile(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(access_level) = self.access_level {
            user.access_level = access_level;
        }
    }
}

impl std::fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPatch")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .field("access_level", &self.access_level)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

impl LoginResponse {
    pub fn bearer(access_token: String, user: User) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_and_access_level_labels() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&AccessLevel::ViewOnly).unwrap(),
            "\"view_only\""
        );
        assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn new_user_defaults_to_full_staff() {
        let new_user: NewUser = serde_json::from_str(
            r#"{"name":"Sam","email":"sam@example.com","phone":"1","password":"pw123456"}"#,
        )
        .unwrap();
        assert_eq!(new_user.role, Role::Staff);
        assert_eq!(new_user.access_level, AccessLevel::Full);
        assert!(!format!("{new_user:?}").contains("pw123456"));
    }

    #[test]
    fn patch_null_fields_are_absent() {
        let patch: UserPatch =
            serde_json::from_str(r#"{"name":"New","phone":null}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("New"));
        assert!(patch.phone.is_none());
        assert!(!patch.is_empty());
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn patch_debug_redacts_password() {
        let patch = UserPatch {
            password: Some("topsecret".into()),
            ..Default::default()
        };
        assert!(!format!("{patch:?}").contains("topsecret"));
    }
}
