//! Harness configuration.
//!
//! Values come from built-in defaults, then `RESTPROBE_*` environment
//! variables, then command-line flags (see [`crate::cli::Cli::apply_to`]).

use std::time::Duration;

use anyhow::ensure;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Service targeted when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const DEFAULT_TIMEOUT_MS: i64 = 30_000;

/// Resolved settings for one harness run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarnessConfig {
    /// Base URL of the service under test.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Scenarios allowed to run at once.
    pub concurrency: usize,
    /// Use the in-memory stub instead of the network.
    pub offline: bool,
    /// Only run scenarios whose name contains this text.
    #[serde(default)]
    pub filter: Option<String>,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl HarnessConfig {
    /// Loads defaults overlaid with `RESTPROBE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be converted to its field type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("RESTPROBE"))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("concurrency", 1_i64)?
            .set_default("offline", false)?
            .set_default("user_agent", restprobe_infrastructure::DEFAULT_USER_AGENT)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Rejects settings the harness cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-HTTP base URL, a zero timeout or zero
    /// concurrency.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://"),
            "base URL must start with http:// or https://, got '{}'",
            self.base_url
        );
        ensure!(self.timeout_ms > 0, "timeout must be greater than zero");
        ensure!(self.concurrency > 0, "concurrency must be at least 1");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Result<HarnessConfig, ConfigError> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        HarnessConfig::from_environment(
            Environment::with_prefix("RESTPROBE").source(Some(source.into_iter().collect())),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.concurrency, 1);
        assert!(!config.offline);
        assert_eq!(config.filter, None);
        assert!(config.user_agent.starts_with("restprobe/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let config = load_with(&[
            ("RESTPROBE_BASE_URL", "http://localhost:3000"),
            ("RESTPROBE_TIMEOUT_MS", "1500"),
            ("RESTPROBE_CONCURRENCY", "4"),
            ("RESTPROBE_OFFLINE", "true"),
            ("RESTPROBE_FILTER", "user"),
        ])
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_ms, 1500);
        assert_eq!(config.concurrency, 4);
        assert!(config.offline);
        assert_eq!(config.filter.as_deref(), Some("user"));
    }

    #[test]
    fn test_bad_number_is_an_error() {
        assert!(load_with(&[("RESTPROBE_TIMEOUT_MS", "soon")]).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = load_with(&[]).unwrap();

        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = DEFAULT_BASE_URL.to_string();
        config.concurrency = 0;
        assert!(config.validate().is_err());
    }
}
