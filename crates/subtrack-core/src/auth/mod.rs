//! Authentication and authorization: credential hashing, bearer tokens,
//! and the access decisions applied before each handler.

pub mod credentials;
pub mod gate;
pub mod policy;

pub use credentials::BcryptCredentialStore;
pub use gate::{AuthGate, IssuedToken, TokenClaims, DEFAULT_TOKEN_EXPIRY_HOURS, MAX_TOKEN_EXPIRY_HOURS};
pub use policy::{authorize_admin, AccessDecision, AccessPolicy};
