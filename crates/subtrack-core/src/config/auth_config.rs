//! Token and password-hashing configuration.

use serde::{Deserialize, Serialize};

use crate::auth::DEFAULT_TOKEN_EXPIRY_HOURS;

/// Placeholder secret shipped in the defaults. Never valid outside development.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Rotating it invalidates every outstanding token.
    pub jwt_secret: String,
    /// Access token lifetime in hours.
    pub token_expiry_hours: i64,
    /// bcrypt cost factor.
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_expiry_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
