//! Bearer token issue/validation and credential login.
//!
//! Tokens are HS256 JWTs carrying only the user id (`sub`) and an absolute
//! expiry. There is no refresh or revocation; expiry is the only liveness
//! bound, and changing the secret invalidates every outstanding token.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AuthConfig;
use crate::errors::{SubtrackError, SubtrackResult};
use crate::models::{LoginResponse, User};
use crate::traits::{ICredentialStore, IUserStorage};

/// Default token lifetime in hours.
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Verified against when a login email is unknown, so both failure paths cost one bcrypt check.
const DUMMY_PASSWORD: &str = "subtrack-timing-equaliser";

/// Longest accepted token lifetime in hours (ten years).
pub const MAX_TOKEN_EXPIRY_HOURS: i64 = 24 * 365 * 10;

/// JWT claims: identity plus issue and expiry times (Unix seconds).
///
/// Only `sub` and `exp` are required on the way in; a missing `iat` reads as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token and the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

pub struct AuthGate {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_hours: i64,
    dummy_hash: OnceLock<String>,
}

impl AuthGate {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_hours,
            dummy_hash: OnceLock::new(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_expiry_hours)
    }

    /// Sign a token for `user_id` valid from now.
    pub fn issue(&self, user_id: &str) -> SubtrackResult<IssuedToken> {
        self.issue_at(user_id, Utc::now())
    }

    /// Sign a token for `user_id` as if issued at `issued_at`.
    pub fn issue_at(&self, user_id: &str, issued_at: DateTime<Utc>) -> SubtrackResult<IssuedToken> {
        let expires_at = Duration::try_hours(self.expiry_hours)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                SubtrackError::Token(format!(
                    "token lifetime of {} hours is out of range",
                    self.expiry_hours
                ))
            })?;
        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SubtrackError::Token(format!("JWT encoding error: {e}")))?;
        Ok(IssuedToken { token, claims })
    }

    /// Verify signature and expiry. Every failure is `Unauthenticated`.
    pub fn verify(&self, token: &str) -> SubtrackResult<TokenClaims> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(reason = ?e.kind(), "rejected bearer token");
            SubtrackError::Unauthenticated
        })?;

        if data.claims.sub.is_empty() {
            debug!("rejected bearer token without subject");
            return Err(SubtrackError::Unauthenticated);
        }
        Ok(data.claims)
    }

    /// Verify `token` and load the user it names.
    pub fn resolve(&self, token: &str, users: &dyn IUserStorage) -> SubtrackResult<User> {
        let claims = self.verify(token)?;
        match users.get_user(&claims.sub)? {
            Some(record) => Ok(record.user),
            None => {
                debug!(user_id = %claims.sub, "token subject no longer exists");
                Err(SubtrackError::Unauthenticated)
            }
        }
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password both return `InvalidCredentials`.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
        users: &dyn IUserStorage,
        credentials: &dyn ICredentialStore,
    ) -> SubtrackResult<User> {
        match users.find_user_by_email(email)? {
            Some(record) if credentials.verify_password(password, &record.password_hash) => {
                Ok(record.user)
            }
            Some(_) => Err(SubtrackError::InvalidCredentials),
            None => {
                let dummy = self.dummy_hash.get_or_init(|| {
                    credentials.hash_password(DUMMY_PASSWORD).unwrap_or_default()
                });
                let _ = credentials.verify_password(password, dummy);
                Err(SubtrackError::InvalidCredentials)
            }
        }
    }

    /// Authenticate and issue a token in one step.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        users: &dyn IUserStorage,
        credentials: &dyn ICredentialStore,
    ) -> SubtrackResult<LoginResponse> {
        let user = self.authenticate(email, password, users, credentials)?;
        let issued = self.issue(&user.id)?;
        Ok(LoginResponse::bearer(issued.token, user))
    }
}
