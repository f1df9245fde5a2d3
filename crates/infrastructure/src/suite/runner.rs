//! Runs the scenario catalogue sequentially or with bounded concurrency.

use std::sync::Arc;
use std::time::Instant;

use restprobe_application::HttpClient;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::report::{ScenarioOutcome, SuiteReport};
use super::scenario::Scenario;

/// Runs scenarios against one service through one shared transport.
pub struct SuiteRunner<C: HttpClient + ?Sized> {
    base_url: String,
    client: Arc<C>,
    concurrency: usize,
    filter: Option<String>,
}

impl<C: HttpClient + ?Sized + 'static> SuiteRunner<C> {
    /// Creates a sequential runner over the whole catalogue.
    pub fn new(base_url: impl Into<String>, client: Arc<C>) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            concurrency: 1,
            filter: None,
        }
    }

    /// Sets how many scenarios may run at once. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Keeps only scenarios whose name contains `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }

    /// Returns the scenarios this runner will execute, in catalogue order.
    #[must_use]
    pub fn selected(&self) -> Vec<Scenario> {
        Scenario::all()
            .iter()
            .copied()
            .filter(|s| {
                self.filter
                    .as_deref()
                    .is_none_or(|filter| s.name().contains(filter))
            })
            .collect()
    }

    /// Runs the selected scenarios and collects their outcomes.
    pub async fn run(&self) -> SuiteReport {
        let scenarios = self.selected();
        tracing::info!(
            scenarios = scenarios.len(),
            concurrency = self.concurrency,
            base_url = %self.base_url,
            "Running suite"
        );

        let start = Instant::now();
        let outcomes = if self.concurrency == 1 {
            self.run_sequential(&scenarios).await
        } else {
            self.run_concurrent(&scenarios).await
        };

        let report = SuiteReport {
            outcomes,
            duration: start.elapsed(),
        };
        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            "Suite finished"
        );
        report
    }

    async fn run_sequential(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(run_scenario(*scenario, &self.base_url, Arc::clone(&self.client)).await);
        }
        outcomes
    }

    async fn run_concurrent(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, scenario) in scenarios.iter().copied().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let client = Arc::clone(&self.client);
            let base_url = self.base_url.clone();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, run_scenario(scenario, &base_url, client).await)
            });
        }

        let mut slots: Vec<Option<ScenarioOutcome>> = scenarios.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => tracing::warn!(error = %e, "Scenario task did not complete"),
            }
        }

        slots
            .into_iter()
            .zip(scenarios)
            .map(|(slot, scenario)| {
                slot.unwrap_or_else(|| {
                    ScenarioOutcome::errored(
                        scenario.name(),
                        "scenario task panicked",
                        std::time::Duration::ZERO,
                    )
                })
            })
            .collect()
    }
}

/// Runs one scenario, timing it and turning errors into an outcome.
pub async fn run_scenario<C>(scenario: Scenario, base_url: &str, client: Arc<C>) -> ScenarioOutcome
where
    C: HttpClient + ?Sized,
{
    let start = Instant::now();
    let result = scenario.run(base_url, client).await;
    let duration = start.elapsed();

    let outcome = match result {
        Ok(results) => ScenarioOutcome::completed(scenario.name(), results, duration),
        Err(e) => ScenarioOutcome::errored(scenario.name(), e.to_string(), duration),
    };

    if outcome.passed() {
        tracing::info!(scenario = scenario.name(), ?duration, "Scenario passed");
    } else if let Some(error) = &outcome.error {
        tracing::warn!(scenario = scenario.name(), %error, "Scenario errored");
    } else {
        tracing::warn!(
            scenario = scenario.name(),
            failures = outcome.failures().count(),
            "Scenario failed"
        );
    }

    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapters::StubHttpClient;
    use pretty_assertions::assert_eq;
    use restprobe_application::HttpClientError;
    use restprobe_domain::{RequestSpec, ResponseSpec};

    const BASE: &str = "https://jsonplaceholder.typicode.com";

    struct RefusingClient;

    #[async_trait::async_trait]
    impl HttpClient for RefusingClient {
        async fn execute(&self, _request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
            Err(HttpClientError::ConnectionRefused {
                host: "localhost".to_string(),
                port: 9,
            })
        }
    }

    #[test]
    fn test_filter_selects_by_substring() {
        let runner = SuiteRunner::new(BASE, Arc::new(StubHttpClient::new()))
            .with_filter(Some("get_user_".to_string()));

        let names: Vec<_> = runner.selected().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["get_user_posts", "get_user_comments", "get_user_todos", "get_user_albums"]
        );

        let runner = runner.with_filter(Some(String::new()));
        assert_eq!(runner.selected().len(), Scenario::all().len());
    }

    #[tokio::test]
    async fn test_sequential_run_passes_against_stub() {
        let report = SuiteRunner::new(BASE, Arc::new(StubHttpClient::new()))
            .run()
            .await;

        assert_eq!(report.total(), 14);
        assert!(report.all_passed(), "{report}");
    }

    #[tokio::test]
    async fn test_concurrent_run_keeps_catalogue_order() {
        let report = SuiteRunner::new(BASE, Arc::new(StubHttpClient::new()))
            .with_concurrency(4)
            .run()
            .await;

        let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        let expected: Vec<_> = Scenario::all().iter().map(|s| s.name()).collect();
        assert_eq!(names, expected);
        assert!(report.all_passed(), "{report}");
    }

    #[tokio::test]
    async fn test_transport_fault_ends_only_its_scenario() {
        let report = SuiteRunner::new(BASE, Arc::new(RefusingClient))
            .with_filter(Some("user".to_string()))
            .with_concurrency(0)
            .run()
            .await;

        assert!(report.total() > 1);
        assert_eq!(report.failed(), report.total());
        for outcome in &report.outcomes {
            assert_eq!(
                outcome.error.as_deref(),
                Some("HTTP error: connection refused by localhost:9")
            );
        }
    }
}
