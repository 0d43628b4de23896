//! # subtrack-server
//!
//! actix-web HTTP surface for subtrack: route registration, bearer-token
//! middleware, identity extractors, request validation, and the mapping
//! from domain errors to JSON responses.

pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod validation;

use actix_cors::Cors;
use actix_web::web;
use subtrack_core::config::ServerConfig;
use tracing::debug;

pub use errors::{ApiError, ApiResult};
pub use middleware::{AuthMiddleware, LoggingMiddleware};
pub use state::AppState;

/// Register every route: health at the root, the API under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(handlers::health_handlers::configure).service(
        web::scope("/api")
            .configure(handlers::auth_handlers::configure)
            .configure(handlers::staff_handlers::configure)
            .configure(handlers::subscription_handlers::configure)
            .configure(handlers::dashboard_handlers::configure),
    );
}

/// JSON extractor config that reports body errors as `VALIDATION_ERROR`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(errors::json_error_handler)
}

/// CORS policy from `server.cors_origins`; `*` allows any origin.
pub fn build_cors(config: &ServerConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        debug!("CORS: allowing any origin");
        Cors::default().allow_any_origin()
    } else {
        debug!(origins = ?config.cors_origins, "CORS: restricted origins");
        config
            .cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
