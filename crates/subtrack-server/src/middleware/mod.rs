//! Request middleware: bearer-token identity and access logging.

pub mod auth;
pub mod logging;

pub use auth::AuthMiddleware;
pub use logging::LoggingMiddleware;
