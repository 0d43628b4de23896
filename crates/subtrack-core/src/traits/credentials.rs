//! Opaque password hashing capability.

use crate::errors::SubtrackResult;

/// Hashes and verifies passwords. The algorithm is an implementation detail.
pub trait ICredentialStore: Send + Sync {
    /// Produce a salted hash suitable for storage.
    fn hash_password(&self, plaintext: &str) -> SubtrackResult<String>;

    /// Constant-time check of `plaintext` against a stored hash.
    /// A malformed hash verifies as `false`.
    fn verify_password(&self, plaintext: &str, hash: &str) -> bool;
}
