use super::error_code::{self, SubtrackErrorCode};
use super::StorageError;

/// Top-level error type for subtrack.
///
/// The first six variants are the request-facing taxonomy; the rest are
/// infrastructure failures that surface as internal errors.
#[derive(Debug, thiserror::Error)]
pub enum SubtrackError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Admin access required")]
    Forbidden,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Credential store error: {0}")]
    Credential(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SubtrackError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "User",
            id: id.into(),
        }
    }

    pub fn subscription_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Subscription",
            id: id.into(),
        }
    }

    /// True for errors whose message is safe to show to API callers.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated
                | Self::Forbidden
                | Self::InvalidCredentials
                | Self::NotFound { .. }
                | Self::Conflict(_)
                | Self::Validation(_)
        )
    }
}

impl From<StorageError> for SubtrackError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation { field } if field == "email" => {
                SubtrackError::Conflict("Email already registered".to_string())
            }
            StorageError::UniqueViolation { field } => {
                SubtrackError::Conflict(format!("Duplicate value for {field}"))
            }
            other => SubtrackError::Storage(other),
        }
    }
}

impl SubtrackErrorCode for SubtrackError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => error_code::UNAUTHENTICATED,
            Self::Forbidden => error_code::FORBIDDEN,
            Self::InvalidCredentials => error_code::INVALID_CREDENTIALS,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Conflict(_) => error_code::CONFLICT,
            Self::Validation(_) => error_code::VALIDATION_ERROR,
            Self::Storage(inner) => inner.error_code(),
            Self::Credential(_) => error_code::CREDENTIAL_ERROR,
            Self::Token(_) => error_code::TOKEN_ERROR,
            Self::Config(_) => error_code::CONFIG_ERROR,
            Self::Internal(_) => error_code::INTERNAL_ERROR,
        }
    }
}

/// Convenience type alias.
pub type SubtrackResult<T> = Result<T, SubtrackError>;
