pub mod auth_config;
pub mod bootstrap_config;
pub mod observability_config;
pub mod server_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::MAX_TOKEN_EXPIRY_HOURS;
use crate::errors::{SubtrackError, SubtrackResult};

pub use auth_config::{AuthConfig, DEFAULT_JWT_SECRET};
pub use bootstrap_config::BootstrapConfig;
pub use observability_config::ObservabilityConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "subtrack.toml";

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SubtrackConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub bootstrap: BootstrapConfig,
    pub observability: ObservabilityConfig,
}

impl SubtrackConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config from a file. A missing file yields defaults; a malformed one is an error.
    pub fn from_file(path: &Path) -> SubtrackResult<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SubtrackError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw).map_err(|e| SubtrackError::Config(format!("{}: {e}", path.display())))
    }

    /// Load from file, then apply process environment overrides.
    pub fn load(path: &Path) -> SubtrackResult<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> SubtrackResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v
                .parse()
                .map_err(|_| SubtrackError::Config(format!("PORT is not a valid port: {v}")))?;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = v
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(v) = lookup("DATABASE_PATH") {
            self.storage.path = v;
        }
        if let Some(v) = lookup("JWT_SECRET_KEY") {
            self.auth.jwt_secret = v;
        }
        if let Some(v) = lookup("ADMIN_EMAIL") {
            self.bootstrap.admin_email = v;
        }
        if let Some(v) = lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()) {
            self.bootstrap.admin_password = Some(v);
        }
        if let Some(v) = lookup("STRICT_MODE") {
            self.bootstrap.strict = parse_flag(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.observability.log_level = v.to_lowercase();
        }
        if let Some(v) = lookup("DEBUG") {
            self.observability.debug = parse_flag(&v);
        }
        Ok(())
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> SubtrackResult<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(SubtrackError::Config("auth.jwt_secret must not be empty".into()));
        }
        if !(1..=MAX_TOKEN_EXPIRY_HOURS).contains(&self.auth.token_expiry_hours) {
            return Err(SubtrackError::Config(format!(
                "auth.token_expiry_hours must be between 1 and {MAX_TOKEN_EXPIRY_HOURS}"
            )));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(SubtrackError::Config(
                "auth.bcrypt_cost must be between 4 and 31".into(),
            ));
        }
        if self.auth.uses_default_secret() && !self.observability.debug {
            warn!("using the default JWT secret outside debug mode; set JWT_SECRET_KEY");
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SubtrackConfig::from_toml(
            r#"
            [server]
            port = 9000

            [auth]
            token_expiry_hours = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.token_expiry_hours, 12);
        assert_eq!(config.auth.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.bootstrap.admin_email, "admin@subscriptionmanager.com");
    }

    #[test]
    fn env_overrides_win_over_file() {
        let env: HashMap<&str, &str> = [
            ("JWT_SECRET_KEY", "s3cret"),
            ("ADMIN_PASSWORD", "hunter22"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("STRICT_MODE", "true"),
            ("PORT", "8080"),
        ]
        .into_iter()
        .collect();

        let mut config = SubtrackConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.bootstrap.admin_password.as_deref(), Some("hunter22"));
        assert_eq!(config.server.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(config.bootstrap.strict);
        assert_eq!(config.server.port, 8080);
        assert!(!config.server.allows_any_origin());
    }

    #[test]
    fn empty_admin_password_is_ignored() {
        let mut config = SubtrackConfig::default();
        config
            .apply_overrides(|k| (k == "ADMIN_PASSWORD").then(String::new))
            .unwrap();
        assert!(config.bootstrap.admin_password.is_none());
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let mut config = SubtrackConfig::default();
        let err = config
            .apply_overrides(|k| (k == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, SubtrackError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SubtrackConfig::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn validate_rejects_non_positive_expiry() {
        let mut config = SubtrackConfig::default();
        config.auth.token_expiry_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_expiry() {
        let mut config = SubtrackConfig::default();
        config.auth.token_expiry_hours = MAX_TOKEN_EXPIRY_HOURS;
        assert!(config.validate().is_ok());

        config.auth.token_expiry_hours = MAX_TOKEN_EXPIRY_HOURS + 1;
        assert!(matches!(config.validate(), Err(SubtrackError::Config(_))));
    }
}
