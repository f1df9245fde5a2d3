//! Restprobe Domain - Core types
//!
//! This crate defines the domain model for the restprobe API test harness:
//! request and response values, the user resource, and assertion types.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod testing;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use request::{HttpMethod, RequestBody, RequestOptions, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use testing::{
    Assertion, AssertionResult, ComparisonOperator, JsonKind, StatusExpectation, TestResults,
    TestSuite,
};
pub use user::{Album, Comment, Post, SubResource, Todo, User, UserPatch};
