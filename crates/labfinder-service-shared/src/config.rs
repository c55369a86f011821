//! Service configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `LABFINDER_DATA_PATH`: Path to `labs.json` (default: `/data/labs.json`)
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `MAIL_API_URL`: Transactional mail endpoint
//! - `MAIL_API_KEY`: Bearer key; when unset, submissions are only logged
//! - `MAIL_FROM`: Sender address
//! - `MAIL_TO`: Inbox that receives enquiries
//!
//! Metrics and logging read their own variables, see [`crate::metrics`] and
//! [`crate::logging`].

use std::path::PathBuf;

use labfinder_lib::mail::{DEFAULT_MAIL_API_URL, DEFAULT_MAIL_FROM, DEFAULT_MAIL_TO};
use labfinder_lib::{MailConfig, DATA_PATH_ENV};

/// Dataset location used when `LABFINDER_DATA_PATH` is unset.
pub const DEFAULT_DATA_PATH: &str = "/data/labs.json";

/// Port used when `SERVICE_PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub mail: MailConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            mail: MailConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_path = get(DATA_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let port = get("SERVICE_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let mail = MailConfig {
            api_url: get("MAIL_API_URL").unwrap_or_else(|| DEFAULT_MAIL_API_URL.to_string()),
            api_key: get("MAIL_API_KEY"),
            from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            to: get("MAIL_TO").unwrap_or_else(|| DEFAULT_MAIL_TO.to_string()),
        };

        Self {
            data_path,
            port,
            mail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServiceConfig::default());
        assert!(config.mail.api_key.is_none());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("LABFINDER_DATA_PATH", "/srv/labs.json"),
            ("SERVICE_PORT", "9090"),
            ("MAIL_API_URL", "https://mail.internal/send"),
            ("MAIL_API_KEY", "key-123"),
            ("MAIL_FROM", "site@example.com"),
            ("MAIL_TO", "ops@example.com"),
        ]));

        assert_eq!(config.data_path, PathBuf::from("/srv/labs.json"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.mail.api_url, "https://mail.internal/send");
        assert_eq!(config.mail.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.mail.from, "site@example.com");
        assert_eq!(config.mail.to, "ops@example.com");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = ServiceConfig::from_lookup(lookup(&[("SERVICE_PORT", "eighty")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[("MAIL_API_KEY", "  ")]));
        assert!(config.mail.api_key.is_none());
    }
}
