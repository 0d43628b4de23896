//! Stable, machine-readable error codes surfaced in API error bodies.

pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CONFLICT: &str = "CONFLICT";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CORRUPT_RECORD: &str = "CORRUPT_RECORD";
pub const CREDENTIAL_ERROR: &str = "CREDENTIAL_ERROR";
pub const TOKEN_ERROR: &str = "TOKEN_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Maps an error to its stable code.
pub trait SubtrackErrorCode {
    fn error_code(&self) -> &'static str;
}
