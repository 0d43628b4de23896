//! Startup admin bootstrap.
//!
//! Ensures the configured admin email maps to an admin account.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::BootstrapConfig;
use crate::errors::SubtrackResult;
use crate::models::{AccessLevel, NewUser, Role, UserPatch};

use super::UserDirectory;

/// What bootstrap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Admin created. `generated_password` is set when none was configured.
    Created {
        user_id: String,
        generated_password: Option<String>,
    },
    /// Existing admin's password replaced with the configured one.
    Rotated { user_id: String },
    /// Non-admin account holding the admin email raised to `admin`;
    /// no password configured, so its password is kept.
    Promoted { user_id: String },
    /// Admin account exists and no password is configured.
    Unchanged { user_id: String },
    /// Strict mode, no account, no password: nothing done.
    Skipped,
    /// Bootstrap disabled in config.
    Disabled,
}

pub fn ensure_admin(
    directory: &UserDirectory,
    config: &BootstrapConfig,
    debug_mode: bool,
) -> SubtrackResult<BootstrapOutcome> {
    if !config.enabled {
        return Ok(BootstrapOutcome::Disabled);
    }

    let shown = |password: &str| {
        if debug_mode {
            password.to_string()
        } else {
            "<hidden>".to_string()
        }
    };

    if let Some(existing) = directory.find_by_email(&config.admin_email)? {
        let Some(password) = config.admin_password.as_deref() else {
            if existing.is_admin() {
                debug!(email = %config.admin_email, "admin account present, no password configured");
                return Ok(BootstrapOutcome::Unchanged {
                    user_id: existing.id,
                });
            }
            directory.update(
                &existing.id,
                UserPatch {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )?;
            warn!(
                email = %config.admin_email,
                previous_role = %existing.role,
                "account holding the admin email promoted to admin; its password is unchanged"
            );
            return Ok(BootstrapOutcome::Promoted {
                user_id: existing.id,
            });
        };

        directory.update(
            &existing.id,
            UserPatch {
                password: Some(password.to_string()),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )?;
        info!(
            email = %config.admin_email,
            password = %shown(password),
            "default admin password rotated"
        );
        return Ok(BootstrapOutcome::Rotated {
            user_id: existing.id,
        });
    }

    let (password, generated) = match config.admin_password.clone() {
        Some(password) => (password, false),
        None if config.strict => {
            debug!("strict mode without ADMIN_PASSWORD; skipping admin bootstrap");
            return Ok(BootstrapOutcome::Skipped);
        }
        None => (Uuid::new_v4().simple().to_string(), true),
    };

    let admin = directory.register(NewUser {
        name: config.admin_name.clone(),
        email: config.admin_email.clone(),
        phone: config.admin_phone.clone(),
        password: password.clone(),
        role: Role::Admin,
        access_level: AccessLevel::Full,
    })?;

    if generated {
        warn!(
            email = %config.admin_email,
            password = %password,
            "default admin created with a generated password; store it now, it will not be shown again"
        );
    } else {
        info!(
            email = %config.admin_email,
            password = %shown(&password),
            "default admin created"
        );
    }

    Ok(BootstrapOutcome::Created {
        user_id: admin.id,
        generated_password: generated.then_some(password),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::{BcryptCredentialStore, MIN_BCRYPT_COST};
    use crate::traits::storage::test_helpers::InMemoryStorage;
    use crate::traits::IUserStorage;
    use std::sync::Arc;

    fn setup() -> (Arc<InMemoryStorage>, UserDirectory) {
        let storage = Arc::new(InMemoryStorage::new());
        let directory = UserDirectory::new(
            storage.clone(),
            Arc::new(BcryptCredentialStore::with_cost(MIN_BCRYPT_COST)),
        );
        (storage, directory)
    }

    fn config(password: Option<&str>, strict: bool) -> BootstrapConfig {
        BootstrapConfig {
            admin_password: password.map(str::to_string),
            strict,
            ..Default::default()
        }
    }

    fn password_matches(storage: &InMemoryStorage, directory: &UserDirectory, id: &str, pw: &str) -> bool {
        let record = storage.get_user(id).unwrap().unwrap();
        directory.credentials().verify_password(pw, &record.password_hash)
    }

    #[test]
    fn creates_admin_with_configured_password() {
        let (storage, directory) = setup();
        let outcome = ensure_admin(&directory, &config(Some("s3cret!"), false), false).unwrap();

        let BootstrapOutcome::Created { user_id, generated_password } = outcome else {
            panic!("expected Created, got {outcome:?}");
        };
        assert!(generated_password.is_none());
        assert!(password_matches(&storage, &directory, &user_id, "s3cret!"));
        assert_eq!(directory.get(&user_id).unwrap().role, Role::Admin);
    }

    #[test]
    fn generates_password_when_none_configured() {
        let (storage, directory) = setup();
        let outcome = ensure_admin(&directory, &config(None, false), false).unwrap();

        let BootstrapOutcome::Created { user_id, generated_password: Some(pw) } = outcome else {
            panic!("expected generated password, got {outcome:?}");
        };
        assert_eq!(pw.len(), 32);
        assert!(password_matches(&storage, &directory, &user_id, &pw));
    }

    #[test]
    fn strict_mode_without_password_skips() {
        let (storage, directory) = setup();
        let outcome = ensure_admin(&directory, &config(None, true), false).unwrap();
        assert_eq!(outcome, BootstrapOutcome::Skipped);
        assert_eq!(storage.user_count(), 0);
    }

    #[test]
    fn rotates_existing_admin_password() {
        let (storage, directory) = setup();
        ensure_admin(&directory, &config(Some("first-pass"), false), false).unwrap();
        let outcome = ensure_admin(&directory, &config(Some("second-pass"), true), false).unwrap();

        let BootstrapOutcome::Rotated { user_id } = outcome else {
            panic!("expected Rotated, got {outcome:?}");
        };
        assert!(password_matches(&storage, &directory, &user_id, "second-pass"));
        assert!(!password_matches(&storage, &directory, &user_id, "first-pass"));
        assert_eq!(storage.user_count(), 1);
    }

    #[test]
    fn existing_admin_without_password_is_untouched() {
        let (storage, directory) = setup();
        ensure_admin(&directory, &config(Some("keep-me"), false), false).unwrap();
        let outcome = ensure_admin(&directory, &config(None, false), false).unwrap();

        let BootstrapOutcome::Unchanged { user_id } = outcome else {
            panic!("expected Unchanged, got {outcome:?}");
        };
        assert!(password_matches(&storage, &directory, &user_id, "keep-me"));
    }

    #[test]
    fn staff_account_on_admin_email_is_promoted() {
        let (storage, directory) = setup();
        let email = BootstrapConfig::default().admin_email;
        let staff = directory
            .register(NewUser {
                name: "Squatter".into(),
                email,
                phone: "1".into(),
                password: "staff-pass".into(),
                role: Role::Staff,
                access_level: AccessLevel::ViewOnly,
            })
            .unwrap();

        let outcome = ensure_admin(&directory, &config(None, false), false).unwrap();

        assert_eq!(outcome, BootstrapOutcome::Promoted { user_id: staff.id.clone() });
        assert_eq!(directory.get(&staff.id).unwrap().role, Role::Admin);
        assert!(password_matches(&storage, &directory, &staff.id, "staff-pass"));
        assert_eq!(storage.user_count(), 1);
    }

    #[test]
    fn disabled_bootstrap_does_nothing() {
        let (storage, directory) = setup();
        let cfg = BootstrapConfig {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(ensure_admin(&directory, &cfg, false).unwrap(), BootstrapOutcome::Disabled);
        assert_eq!(storage.user_count(), 0);
    }
}
