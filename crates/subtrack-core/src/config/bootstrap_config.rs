//! Startup admin-account bootstrap configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub admin_email: String,
    pub admin_name: String,
    pub admin_phone: String,
    /// When set, the admin is created with (or rotated to) this password.
    pub admin_password: Option<String>,
    /// Strict production mode: never generate a password for a missing admin.
    pub strict: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_email: "admin@subscriptionmanager.com".to_string(),
            admin_name: "Admin".to_string(),
            admin_phone: "9999999999".to_string(),
            admin_password: None,
            strict: false,
        }
    }
}
