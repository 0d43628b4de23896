//! Shared application state handed to every worker as `web::Data<AppState>`.

use std::sync::Arc;

use subtrack_core::auth::AuthGate;
use subtrack_core::config::SubtrackConfig;
use subtrack_core::errors::SubtrackResult;
use subtrack_core::models::User;
use subtrack_core::traits::{ICredentialStore, ISubscriptionStorage, IUserStorage};
use subtrack_core::{BcryptCredentialStore, SubscriptionLedger, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AuthGate>,
    pub users: UserDirectory,
    pub subscriptions: SubscriptionLedger,
}

impl AppState {
    pub fn new(gate: AuthGate, users: UserDirectory, subscriptions: SubscriptionLedger) -> Self {
        Self {
            gate: Arc::new(gate),
            users,
            subscriptions,
        }
    }

    /// Wire the services over one storage backend using `config.auth`.
    pub fn from_config<S>(storage: Arc<S>, config: &SubtrackConfig) -> Self
    where
        S: IUserStorage + ISubscriptionStorage + 'static,
    {
        let credentials: Arc<dyn ICredentialStore> =
            Arc::new(BcryptCredentialStore::with_cost(config.auth.bcrypt_cost));
        Self::new(
            AuthGate::from_config(&config.auth),
            UserDirectory::new(storage.clone(), credentials),
            SubscriptionLedger::new(storage),
        )
    }

    /// Resolve a bearer token to its user.
    pub fn resolve_token(&self, token: &str) -> SubtrackResult<User> {
        self.gate.resolve(token, self.users.storage())
    }
}
