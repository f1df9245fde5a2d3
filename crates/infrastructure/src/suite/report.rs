//! Scenario outcomes and the suite report.

use std::fmt;
use std::time::Duration;

use restprobe_domain::{AssertionResult, TestResults};

/// What happened when one scenario ran.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// One entry per checked response.
    pub results: Vec<TestResults>,
    /// Set when the scenario stopped on a transport or decode error.
    pub error: Option<String>,
    /// Wall-clock time spent in the scenario.
    pub duration: Duration,
}

impl ScenarioOutcome {
    /// Creates an outcome for a scenario that ran to completion.
    #[must_use]
    pub fn completed(
        name: impl Into<String>,
        results: Vec<TestResults>,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            results,
            error: None,
            duration,
        }
    }

    /// Creates an outcome for a scenario that could not finish.
    #[must_use]
    pub fn errored(name: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
            error: Some(error.into()),
            duration,
        }
    }

    /// True when the scenario finished and every assertion held.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.results.iter().all(TestResults::all_passed)
    }

    /// Number of assertions evaluated.
    #[must_use]
    pub fn assertion_count(&self) -> usize {
        self.results.iter().map(|r| r.total).sum()
    }

    /// Iterates over failed assertions across all checked responses.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().flat_map(TestResults::failures)
    }
}

/// Outcomes of a suite run, in catalogue order.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    /// One outcome per selected scenario.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Wall-clock time for the whole run.
    pub duration: Duration,
}

impl SuiteReport {
    /// Number of scenarios run.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of passing scenarios.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of failing scenarios.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// True when every scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    /// Looks up an outcome by scenario name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            let mark = if outcome.passed() { "PASS" } else { "FAIL" };
            writeln!(
                f,
                "{mark} {} ({} assertions, {} ms)",
                outcome.name,
                outcome.assertion_count(),
                outcome.duration.as_millis()
            )?;

            if let Some(error) = &outcome.error {
                writeln!(f, "    error: {error}")?;
            }
            for failure in outcome.failures() {
                writeln!(
                    f,
                    "    {}: {}",
                    failure.assertion.description(),
                    failure.error.as_deref().unwrap_or("failed")
                )?;
            }
        }

        write!(
            f,
            "{} scenarios: {} passed, {} failed in {} ms",
            self.total(),
            self.passed(),
            self.failed(),
            self.duration.as_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restprobe_domain::Assertion;

    fn passing(name: &str) -> ScenarioOutcome {
        ScenarioOutcome::completed(
            name,
            vec![TestResults::new(
                name,
                vec![AssertionResult::pass(Assertion::status(200))],
            )],
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_outcome_passed() {
        assert!(passing("get_all_users").passed());

        let errored = ScenarioOutcome::errored(
            "get_user_todos",
            "connection refused by localhost:9",
            Duration::ZERO,
        );
        assert!(!errored.passed());
        assert_eq!(errored.assertion_count(), 0);

        let failing = ScenarioOutcome::completed(
            "user_not_found",
            vec![TestResults::new(
                "user_not_found",
                vec![AssertionResult::fail(
                    Assertion::status(404),
                    "Expected status = 404, got 200",
                )],
            )],
            Duration::ZERO,
        );
        assert!(!failing.passed());
        assert_eq!(failing.failures().count(), 1);
    }

    #[test]
    fn test_report_counts_and_display() {
        let report = SuiteReport {
            outcomes: vec![
                passing("get_single_user"),
                ScenarioOutcome::errored(
                    "delete_user",
                    "request timed out after 10 ms",
                    Duration::ZERO,
                ),
            ],
            duration: Duration::from_millis(12),
        };

        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());
        assert!(report.outcome("delete_user").is_some());

        assert_eq!(
            report.to_string(),
            "PASS get_single_user (1 assertions, 5 ms)\n\
             FAIL delete_user (0 assertions, 0 ms)\n    \
             error: request timed out after 10 ms\n\
             2 scenarios: 1 passed, 1 failed in 12 ms"
        );
    }

    #[test]
    fn test_empty_report_passes() {
        assert!(SuiteReport::default().all_passed());
    }
}
