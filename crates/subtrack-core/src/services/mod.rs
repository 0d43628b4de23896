//! Application services over the storage traits.

pub mod bootstrap;
pub mod subscription_ledger;
pub mod user_directory;

pub use bootstrap::{ensure_admin, BootstrapOutcome};
pub use subscription_ledger::SubscriptionLedger;
pub use user_directory::UserDirectory;
