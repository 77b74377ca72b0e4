use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::upstream;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";
pub const DEFAULT_OUTPUT_FILE: &str = "cotacao.txt";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub upstream_url: String,
    pub upstream_pair: String,
    pub timeouts: Timeouts,
}

/// Per-request time budgets of the rate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub upstream: Duration,
    pub database: Duration,
    /// Cap on the whole request. `None` leaves it bounded only by the
    /// connection staying open.
    pub request: Option<Duration>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            upstream: Duration::from_secs(3),
            database: Duration::from_secs(1),
            request: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub output_file: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            timeout: Duration::from_secs(1),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Timeouts::default();
        Ok(Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL not set")?,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            upstream_url: var("UPSTREAM_URL")
                .unwrap_or_else(|| upstream::DEFAULT_URL.to_string()),
            upstream_pair: var("UPSTREAM_PAIR")
                .unwrap_or_else(|| upstream::DEFAULT_PAIR.to_string()),
            timeouts: Timeouts {
                upstream: millis(&var, "UPSTREAM_TIMEOUT_MS")?.unwrap_or(defaults.upstream),
                database: millis(&var, "DATABASE_TIMEOUT_MS")?.unwrap_or(defaults.database),
                request: millis(&var, "REQUEST_TIMEOUT_MS")?,
            },
        })
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            server_url: var("SERVER_URL").unwrap_or(defaults.server_url),
            output_file: var("OUTPUT_FILE").unwrap_or(defaults.output_file),
            timeout: millis(&var, "CLIENT_TIMEOUT_MS")?.unwrap_or(defaults.timeout),
        })
    }
}

fn millis(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    var(key)
        .map(|raw| {
            u64::from_str(raw.trim())
                .map(Duration::from_millis)
                .with_context(|| format!("{key} must be a number of milliseconds, got {raw:?}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn server_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.upstream_url, upstream::DEFAULT_URL);
        assert_eq!(config.upstream_pair, "USDBRL");
        assert_eq!(config.timeouts, Timeouts::default());
        assert_eq!(config.timeouts.upstream, Duration::from_secs(3));
        assert_eq!(config.timeouts.database, Duration::from_secs(1));
    }

    #[test]
    fn server_requires_database_url() {
        assert!(ServerConfig::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn server_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("UPSTREAM_TIMEOUT_MS", "250"),
            ("DATABASE_TIMEOUT_MS", " 100 "),
            ("REQUEST_TIMEOUT_MS", "2000"),
        ]))
        .unwrap();

        assert_eq!(config.timeouts.upstream, Duration::from_millis(250));
        assert_eq!(config.timeouts.database, Duration::from_millis(100));
        assert_eq!(config.timeouts.request, Some(Duration::from_secs(2)));
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("UPSTREAM_TIMEOUT_MS", "3s"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_MS"));
    }

    #[test]
    fn client_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.server_url, "http://localhost:8080/cotacao");
        assert_eq!(config.output_file, "cotacao.txt");
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
