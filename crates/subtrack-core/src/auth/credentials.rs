//! bcrypt-backed [`ICredentialStore`].

use tracing::debug;

use crate::errors::{SubtrackError, SubtrackResult};
use crate::traits::ICredentialStore;

/// Lowest cost bcrypt accepts. Tests use it to keep hashing fast.
pub const MIN_BCRYPT_COST: u32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct BcryptCredentialStore {
    cost: u32,
}

impl BcryptCredentialStore {
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ICredentialStore for BcryptCredentialStore {
    fn hash_password(&self, plaintext: &str) -> SubtrackResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| SubtrackError::Credential(e.to_string()))
    }

    fn verify_password(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or_else(|e| {
            debug!(error = %e, "password hash could not be verified");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> BcryptCredentialStore {
        BcryptCredentialStore::with_cost(MIN_BCRYPT_COST)
    }

    #[test]
    fn hash_then_verify() {
        let hash = store().hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(store().verify_password("correct horse", &hash));
        assert!(!store().verify_password("wrong horse", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = store().hash_password("same").unwrap();
        let b = store().hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!store().verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!store().verify_password("anything", ""));
    }
}
