//! Runtime configuration for core components.
//!
//! # Responsibility
//! - Read database, logging, mailer and provider settings from a key lookup.
//! - Hand explicit config values to components at construction time.
//!
//! # Invariants
//! - Loading never mutates process state; `from_lookup` is deterministic.
//! - The mailer is enabled only when host, user and password are all set.
//! - The provider is enabled only when `USE_OPENAI` is true and a key is set.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DB_PATH: &str = "lifehub.sqlite3";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_DB_PATH: &str = "LIFEHUB_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LIFEHUB_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LIFEHUB_LOG_DIR";
pub const ENV_SMTP_HOST: &str = "SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
pub const ENV_SMTP_USER: &str = "SMTP_USER";
pub const ENV_SMTP_PASS: &str = "SMTP_PASS";
pub const ENV_USE_OPENAI: &str = "USE_OPENAI";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_ENDPOINT: &str = "OPENAI_ENDPOINT";
pub const ENV_OPENAI_TIMEOUT_SECS: &str = "OPENAI_TIMEOUT_SECS";

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// SMTP settings for the digest mailer.
#[derive(Clone, PartialEq, Eq)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
    /// Login name; also used as the sender address.
    pub user: String,
    pub password: String,
}

impl Debug for MailerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for the chat-completions suggestion provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// Upper bound for one provider round-trip.
    pub timeout: Duration,
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Top-level configuration consumed by the CLI and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables file logging.
    pub log_dir: Option<String>,
    pub mailer: Option<MailerConfig>,
    pub provider: Option<ProviderConfig>,
}

impl CoreConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            db_path: get(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            log_level: get(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: get(ENV_LOG_DIR),
            mailer: load_mailer(&get)?,
            provider: load_provider(&get)?,
        })
    }
}

fn load_mailer(get: &impl Fn(&str) -> Option<String>) -> Result<Option<MailerConfig>, ConfigError> {
    let port = match get(ENV_SMTP_PORT) {
        Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            key: ENV_SMTP_PORT,
            value,
            reason: "expected a port number",
        })?,
        None => DEFAULT_SMTP_PORT,
    };

    let (Some(host), Some(user), Some(password)) =
        (get(ENV_SMTP_HOST), get(ENV_SMTP_USER), get(ENV_SMTP_PASS))
    else {
        return Ok(None);
    };

    Ok(Some(MailerConfig {
        host,
        port,
        user,
        password,
    }))
}

fn load_provider(
    get: &impl Fn(&str) -> Option<String>,
) -> Result<Option<ProviderConfig>, ConfigError> {
    let enabled = get(ENV_USE_OPENAI)
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "true" | "1"))
        .unwrap_or(false);
    if !enabled {
        return Ok(None);
    }

    let Some(api_key) = get(ENV_OPENAI_API_KEY) else {
        return Ok(None);
    };

    let timeout = match get(ENV_OPENAI_TIMEOUT_SECS) {
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: ENV_OPENAI_TIMEOUT_SECS,
                    value,
                    reason: "expected a positive number of seconds",
                })
            }
        },
        None => DEFAULT_PROVIDER_TIMEOUT,
    };

    Ok(Some(ProviderConfig {
        api_key,
        model: get(ENV_OPENAI_MODEL).unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        endpoint: get(ENV_OPENAI_ENDPOINT).unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
        timeout,
    }))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_PROVIDER_TIMEOUT, DEFAULT_SMTP_PORT};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn load(pairs: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        CoreConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_lookup_yields_defaults_with_features_disabled() {
        let config = load(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("lifehub.sqlite3"));
        assert!(config.log_dir.is_none());
        assert!(config.mailer.is_none());
        assert!(config.provider.is_none());
    }

    #[test]
    fn mailer_requires_host_user_and_password() {
        let partial = load(&[("SMTP_HOST", "smtp.example.com"), ("SMTP_USER", "me@example.com")])
            .unwrap();
        assert!(partial.mailer.is_none());

        let full = load(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "me@example.com"),
            ("SMTP_PASS", "secret"),
        ])
        .unwrap();
        let mailer = full.mailer.expect("mailer should be configured");
        assert_eq!(mailer.port, DEFAULT_SMTP_PORT);
        assert!(!format!("{mailer:?}").contains("secret"));
    }

    #[test]
    fn invalid_smtp_port_is_rejected() {
        let err = load(&[("SMTP_PORT", "smtp")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SMTP_PORT", .. }));
    }

    #[test]
    fn provider_needs_flag_and_key() {
        assert!(load(&[("OPENAI_API_KEY", "sk-test")]).unwrap().provider.is_none());
        assert!(load(&[("USE_OPENAI", "true")]).unwrap().provider.is_none());

        let config = load(&[
            ("USE_OPENAI", "TRUE"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        let provider = config.provider.expect("provider should be configured");
        assert_eq!(provider.model, "gpt-4o-mini");
        assert_eq!(provider.timeout, Duration::from_secs(3));
    }

    #[test]
    fn provider_timeout_defaults_and_rejects_zero() {
        let config = load(&[("USE_OPENAI", "1"), ("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.provider.unwrap().timeout, DEFAULT_PROVIDER_TIMEOUT);

        let err = load(&[
            ("USE_OPENAI", "true"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "OPENAI_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
