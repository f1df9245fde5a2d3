//! The user API scenario suite.
//!
//! [`Scenario`] is the catalogue of independent test cases, [`SuiteRunner`]
//! executes a selection of them and [`SuiteReport`] collects the outcomes.

mod report;
mod runner;
mod scenario;

pub use report::{ScenarioOutcome, SuiteReport};
pub use runner::{SuiteRunner, run_scenario};
pub use scenario::Scenario;
