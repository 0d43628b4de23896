//! # subtrack-core
//!
//! Foundation crate for subtrack, a subscription-tracking backend.
//! Defines the domain models, storage and credential traits, errors,
//! config, tracing setup, and the business rules: status derivation,
//! dashboard aggregation, the auth gate, and the user/subscription services.

pub mod auth;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod services;
pub mod status;
pub mod telemetry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use auth::{AuthGate, BcryptCredentialStore};
pub use config::SubtrackConfig;
pub use errors::{StorageError, SubtrackError, SubtrackErrorCode, SubtrackResult};
pub use services::{SubscriptionLedger, UserDirectory};
