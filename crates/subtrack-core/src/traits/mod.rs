//! Shared traits at the persistence and credential seams.

pub mod credentials;
pub mod storage;

pub use credentials::ICredentialStore;
pub use storage::{ISubscriptionStorage, IUserStorage};
