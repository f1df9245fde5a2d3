//! Command-line interface.

use clap::Parser;

use crate::config::HarnessConfig;

/// Runs the users API scenario suite against a JSONPlaceholder-style service.
#[derive(Debug, Parser)]
#[command(name = "restprobe", version, about)]
pub struct Cli {
    /// Base URL of the service under test
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "N")]
    pub timeout_ms: Option<u64>,

    /// Answer requests from the built-in stub instead of the network
    #[arg(long)]
    pub offline: bool,

    /// Number of scenarios to run at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Only run scenarios whose name contains TEXT
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Print the scenario catalogue and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Overrides configuration values with the flags that were given.
    pub fn apply_to(&self, config: &mut HarnessConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if self.offline {
            config.offline = true;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.filter.is_some() {
            config.filter.clone_from(&self.filter);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn base_config() -> HarnessConfig {
        HarnessConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 30_000,
            concurrency: 1,
            offline: false,
            filter: None,
            user_agent: "restprobe/test".to_string(),
        }
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["restprobe"]).unwrap();
        let mut config = base_config();

        cli.apply_to(&mut config);

        assert_eq!(config, base_config());
        assert!(!cli.list);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "restprobe",
            "--base-url",
            "http://localhost:3000",
            "--timeout-ms",
            "500",
            "--offline",
            "--concurrency",
            "3",
            "--filter",
            "get_user",
        ])
        .unwrap();
        let mut config = base_config();

        cli.apply_to(&mut config);

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_ms, 500);
        assert!(config.offline);
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.filter.as_deref(), Some("get_user"));
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["restprobe", "--timeout-ms", "fast"]).is_err());
    }
}
