//! HTTP error mapping.
//!
//! `ApiError` wraps [`SubtrackError`] so it can implement actix's
//! `ResponseError` (orphan rule). Bodies are `{ "error": ..., "code": ... }`;
//! infrastructure failures are logged here and replaced by a generic message.

use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use subtrack_core::errors::error_code;
use subtrack_core::{SubtrackError, SubtrackErrorCode};
use tracing::error;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub SubtrackError);

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        ApiError(SubtrackError::Internal(format!("blocking task failed: {err}")))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            SubtrackError::Unauthenticated | SubtrackError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            SubtrackError::Forbidden => StatusCode::FORBIDDEN,
            SubtrackError::NotFound { .. } => StatusCode::NOT_FOUND,
            SubtrackError::Conflict(_) => StatusCode::CONFLICT,
            SubtrackError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.0.is_client_error() {
            ErrorResponse {
                error: self.0.to_string(),
                code: self.0.error_code(),
            }
        } else {
            error!(code = self.0.error_code(), error = %self.0, "request failed");
            ErrorResponse {
                error: "Internal server error".to_string(),
                code: error_code::INTERNAL_ERROR,
            }
        };

        let mut response = HttpResponse::build(self.status_code());
        if matches!(self.0, SubtrackError::Unauthenticated) {
            response.insert_header(("WWW-Authenticate", "Bearer"));
        }
        response.json(body)
    }
}

/// Malformed or mistyped JSON bodies become 400 `VALIDATION_ERROR`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError(SubtrackError::Validation(err.to_string())).into()
}
