//! Restprobe Infrastructure - Adapters and the scenario suite
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer:
//! - `ReqwestHttpClient` for the live service
//! - `StubHttpClient`, an in-memory stand-in with the same routes
//! - `TestRunner`, which evaluates assertions against responses
//! - The scenario catalogue and its runner

pub mod adapters;
pub mod suite;
pub mod testing;

pub use adapters::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ReqwestHttpClient, StubHttpClient};
pub use suite::{Scenario, ScenarioOutcome, SuiteReport, SuiteRunner, run_scenario};
pub use testing::TestRunner;
