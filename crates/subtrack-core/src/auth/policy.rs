//! Access decisions composed in front of handlers.

use crate::errors::{SubtrackError, SubtrackResult};
use crate::models::User;

/// What a route requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    Authenticated,
    AdminOnly,
}

/// Result of checking a caller against an [`AccessPolicy`].
#[derive(Debug)]
pub enum AccessDecision {
    Allow(User),
    Deny(SubtrackError),
}

impl AccessDecision {
    pub fn into_result(self) -> SubtrackResult<User> {
        match self {
            AccessDecision::Allow(user) => Ok(user),
            AccessDecision::Deny(err) => Err(err),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow(_))
    }
}

impl AccessPolicy {
    /// Decide from an identity resolution outcome. Resolution failures are
    /// passed through unchanged (they are already `Unauthenticated`).
    pub fn decide(self, resolved: SubtrackResult<User>) -> AccessDecision {
        let user = match resolved {
            Ok(user) => user,
            Err(err) => return AccessDecision::Deny(err),
        };
        match self {
            AccessPolicy::Authenticated => AccessDecision::Allow(user),
            AccessPolicy::AdminOnly => match authorize_admin(&user) {
                Ok(()) => AccessDecision::Allow(user),
                Err(err) => AccessDecision::Deny(err),
            },
        }
    }
}

/// Require the `admin` role.
pub fn authorize_admin(user: &User) -> SubtrackResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(SubtrackError::Forbidden)
    }
}
