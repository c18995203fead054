use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::session::AdminCredentials;

const DEFAULT_ADMIN_SESSION_TTL_SECS: i64 = 12 * 60 * 60;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_SESSION_DIR: &str = ".bozorfood";
const DEFAULT_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Storefront configuration.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ADMIN_USERNAME | required | administrator login |
/// | ADMIN_PASSWORD | required | administrator password |
/// | ADMIN_SESSION_TTL_SECS | 43200 | admin session lifetime |
/// | CLEANUP_INTERVAL_SECS | 86400 | delivered-order cleanup period, 0 disables |
/// | SESSION_DIR | .bozorfood | where client session state is saved |
/// | CHANNEL_BUFFER | 32 | table actor mailbox size |
#[derive(Debug, Clone)]
pub struct Config {
    pub admin: AdminCredentials,
    pub admin_session_ttl: chrono::Duration,
    /// `None` disables the cleanup job.
    pub cleanup_interval: Option<Duration>,
    pub session_dir: PathBuf,
    pub channel_buffer: usize,
}

impl Config {
    /// Defaults for everything except the credentials.
    pub fn new(admin: AdminCredentials) -> Self {
        Self {
            admin,
            admin_session_ttl: chrono::Duration::seconds(DEFAULT_ADMIN_SESSION_TTL_SECS),
            cleanup_interval: Some(Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS)),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }

    /// Loads from the process environment.
    ///
    /// Unparseable optional values fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let username = lookup("ADMIN_USERNAME").ok_or(ConfigError::MissingVar("ADMIN_USERNAME"))?;
        let password = lookup("ADMIN_PASSWORD").ok_or(ConfigError::MissingVar("ADMIN_PASSWORD"))?;

        let ttl_secs = lookup("ADMIN_SESSION_TTL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ADMIN_SESSION_TTL_SECS);
        let cleanup_secs = lookup("CLEANUP_INTERVAL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECS);

        Ok(Self {
            admin: AdminCredentials::new(username, password),
            admin_session_ttl: chrono::Duration::seconds(ttl_secs),
            cleanup_interval: (cleanup_secs > 0).then(|| Duration::from_secs(cleanup_secs)),
            session_dir: lookup("SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR)),
            channel_buffer: lookup("CHANNEL_BUFFER")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_CHANNEL_BUFFER),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_credentials_are_required() {
        let result = Config::from_lookup(lookup(&[("ADMIN_USERNAME", "admin")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingVar("ADMIN_PASSWORD"));
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[("ADMIN_USERNAME", "admin"), ("ADMIN_PASSWORD", "pw")])).unwrap();
        assert_eq!(config.admin_session_ttl, chrono::Duration::hours(12));
        assert_eq!(config.cleanup_interval, Some(Duration::from_secs(86400)));
        assert_eq!(config.session_dir, PathBuf::from(".bozorfood"));
        assert_eq!(config.channel_buffer, 32);
    }

    #[test]
    fn test_overrides_and_disabled_cleanup() {
        let config = Config::from_lookup(lookup(&[
            ("ADMIN_USERNAME", "admin"),
            ("ADMIN_PASSWORD", "pw"),
            ("ADMIN_SESSION_TTL_SECS", "600"),
            ("CLEANUP_INTERVAL_SECS", "0"),
            ("SESSION_DIR", "/tmp/shop"),
            ("CHANNEL_BUFFER", "not-a-number"),
        ]))
        .unwrap();
        assert_eq!(config.admin_session_ttl, chrono::Duration::minutes(10));
        assert_eq!(config.cleanup_interval, None);
        assert_eq!(config.session_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.channel_buffer, 32);
    }
}
