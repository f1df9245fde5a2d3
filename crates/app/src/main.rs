//! restprobe - Main Entry Point
//!
//! Loads configuration, picks the transport and runs the scenario suite.
//! Exits with status 1 when any scenario fails.

mod cli;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, ensure};
use clap::Parser;
use restprobe_application::HttpClient;
use restprobe_infrastructure::{
    ReqwestHttpClient, Scenario, StubHttpClient, SuiteReport, SuiteRunner,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::HarnessConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.list {
        for scenario in Scenario::all() {
            println!("{:<26} {}", scenario.name(), scenario.description());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = HarnessConfig::load().context("failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate()?;

    tracing::info!(
        "Starting restprobe v{} against {}{}",
        env!("CARGO_PKG_VERSION"),
        config.base_url,
        if config.offline { " (offline)" } else { "" }
    );

    let report = if config.offline {
        run_suite(&config, Arc::new(StubHttpClient::new())).await?
    } else {
        let client = ReqwestHttpClient::with_settings(&config.user_agent, config.timeout())
            .context("failed to build HTTP client")?;
        run_suite(&config, Arc::new(client)).await?
    };

    println!("{report}");

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_suite<C>(config: &HarnessConfig, client: Arc<C>) -> anyhow::Result<SuiteReport>
where
    C: HttpClient + ?Sized + 'static,
{
    let runner = SuiteRunner::new(config.base_url.clone(), client)
        .with_concurrency(config.concurrency)
        .with_filter(config.filter.clone());

    ensure!(
        !runner.selected().is_empty(),
        "no scenario name contains '{}'",
        config.filter.as_deref().unwrap_or_default()
    );

    Ok(runner.run().await)
}
