//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces test results.

use regex::Regex;
use restprobe_domain::response::ResponseSpec;
use restprobe_domain::testing::{
    Assertion, AssertionResult, ComparisonOperator, JsonKind, StatusExpectation, TestResults,
    TestSuite,
};
use serde_json::Value;

/// Longest body excerpt included in a failure.
const PREVIEW_LEN: usize = 100;

/// Test runner that executes assertions against responses.
#[derive(Debug, Default)]
pub struct TestRunner {
    /// Whether to stop on first failure.
    stop_on_failure: bool,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Set whether to stop on first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Run a test suite against a response.
    #[must_use]
    pub fn run(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let mut results = Vec::with_capacity(suite.assertions.len());

        for assertion in &suite.assertions {
            let result = self.run_assertion(assertion, response);
            let failed = !result.passed;
            results.push(result);

            if failed && (self.stop_on_failure || suite.stop_on_failure) {
                break;
            }
        }

        TestResults::new(&suite.name, results)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => check_status_code(assertion, response, expected),
            Assertion::JsonPath { path, expected } => {
                with_json_at(assertion, response, path, |value| match expected {
                    Some(expected) if value != expected => AssertionResult::fail_with_value(
                        assertion.clone(),
                        value.to_string(),
                        format!(
                            "JSON path '{path}' value mismatch: expected {expected}, got {value}"
                        ),
                    ),
                    _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
                })
            }
            Assertion::JsonType { path, kind } => {
                with_json_at(assertion, response, path, |value| {
                    check_json_type(assertion, path, value, *kind)
                })
            }
            Assertion::ArrayLength {
                path,
                operator,
                length,
            } => with_json_at(assertion, response, path, |value| {
                check_array_length(assertion, path, value, *operator, *length)
            }),
            Assertion::EachElement {
                path,
                field,
                expected,
            } => with_json_at(assertion, response, path, |value| {
                check_each_element(assertion, path, value, field, expected)
            }),
            Assertion::BodyMatches { pattern } => check_body_matches(assertion, response, pattern),
            Assertion::ContentType { expected } => {
                check_content_type(assertion, response, expected)
            }
            Assertion::IsJson => match response.json_value() {
                Ok(_) => AssertionResult::pass(assertion.clone()),
                Err(e) => AssertionResult::fail_with_value(
                    assertion.clone(),
                    preview(&response.text()),
                    format!("Body is not valid JSON: {e}"),
                ),
            },
        }
    }
}

fn check_status_code(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &StatusExpectation,
) -> AssertionResult {
    let actual = response.status;
    if expected.matches(actual) {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!("Expected status {}, got {}", expected.description(), actual),
        )
    }
}

/// Decodes the body, resolves `path` and hands the value to `check`.
fn with_json_at<F>(
    assertion: &Assertion,
    response: &ResponseSpec,
    path: &str,
    check: F,
) -> AssertionResult
where
    F: FnOnce(&Value) -> AssertionResult,
{
    let json = match response.json_value() {
        Ok(json) => json,
        Err(e) => {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                preview(&response.text()),
                format!("Failed to parse body as JSON: {e}"),
            );
        }
    };

    match query_json_path(&json, path) {
        Ok(Some(value)) => check(value),
        Ok(None) => {
            AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
        }
        Err(e) => {
            AssertionResult::fail(assertion.clone(), format!("Invalid JSON path '{path}': {e}"))
        }
    }
}

fn check_json_type(
    assertion: &Assertion,
    path: &str,
    value: &Value,
    kind: JsonKind,
) -> AssertionResult {
    let actual = JsonKind::of(value);
    if actual == kind {
        AssertionResult::pass_with_value(assertion.clone(), actual.as_str())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.as_str(),
            format!("JSON path '{path}' is {}, expected {}", actual.as_str(), kind.as_str()),
        )
    }
}

fn check_array_length(
    assertion: &Assertion,
    path: &str,
    value: &Value,
    operator: ComparisonOperator,
    length: usize,
) -> AssertionResult {
    let Some(items) = value.as_array() else {
        return AssertionResult::fail_with_value(
            assertion.clone(),
            JsonKind::of(value).as_str(),
            format!("JSON path '{path}' is not an array"),
        );
    };

    let actual = items.len();
    if operator.compare(actual, length) {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!(
                "Array length {actual} does not satisfy {} {length}",
                operator.symbol()
            ),
        )
    }
}

fn check_each_element(
    assertion: &Assertion,
    path: &str,
    value: &Value,
    field: &str,
    expected: &Value,
) -> AssertionResult {
    let Some(items) = value.as_array() else {
        return AssertionResult::fail_with_value(
            assertion.clone(),
            JsonKind::of(value).as_str(),
            format!("JSON path '{path}' is not an array"),
        );
    };

    let mismatch = items
        .iter()
        .enumerate()
        .find(|(_, item)| item.get(field) != Some(expected));

    match mismatch {
        None => {
            AssertionResult::pass_with_value(assertion.clone(), format!("{} elements", items.len()))
        }
        Some((index, item)) => {
            let actual = item.get(field).map_or_else(|| "<missing>".to_string(), Value::to_string);
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.clone(),
                format!("Element {index}: '{field}' is {actual}, expected {expected}"),
            )
        }
    }
}

fn check_body_matches(
    assertion: &Assertion,
    response: &ResponseSpec,
    pattern: &str,
) -> AssertionResult {
    match Regex::new(pattern) {
        Ok(regex) => {
            let body = response.text();
            if regex.is_match(&body) {
                AssertionResult::pass(assertion.clone())
            } else {
                AssertionResult::fail_with_value(
                    assertion.clone(),
                    preview(&body),
                    format!("Body does not match pattern '{pattern}'"),
                )
            }
        }
        Err(e) => AssertionResult::fail(
            assertion.clone(),
            format!("Invalid regex pattern '{pattern}': {e}"),
        ),
    }
}

fn check_content_type(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &str,
) -> AssertionResult {
    match response.content_type() {
        Some(actual) if actual.contains(expected) => {
            AssertionResult::pass_with_value(assertion.clone(), actual)
        }
        Some(actual) => AssertionResult::fail_with_value(
            assertion.clone(),
            actual,
            format!("Content-Type '{actual}' does not contain '{expected}'"),
        ),
        None => AssertionResult::fail(assertion.clone(), "No Content-Type header present"),
    }
}

/// Truncates a body for display, respecting char boundaries.
fn preview(body: &str) -> String {
    if body.chars().count() > PREVIEW_LEN {
        let cut: String = body.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: `$`, `$.field`, `$.field.nested`, `$[0]`, `$.array[0].field`.
fn query_json_path<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let mut current = json;
    for step in parse_steps(rest)? {
        let next = match step {
            Step::Field(name) => current.get(name),
            Step::Index(index) => current.get(index),
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

#[derive(Debug, PartialEq, Eq)]
enum Step<'p> {
    Field(&'p str),
    Index(usize),
}

/// Splits the part of a path after `$` into field and index steps.
fn parse_steps(path: &str) -> Result<Vec<Step<'_>>, String> {
    let mut steps = Vec::new();
    let mut rest = path;

    while !rest.is_empty() {
        if let Some(after_dot) = rest.strip_prefix('.') {
            let end = after_dot.find(['.', '[']).unwrap_or(after_dot.len());
            let name = &after_dot[..end];
            if name.is_empty() {
                return Err("empty field name".to_string());
            }
            steps.push(Step::Field(name));
            rest = &after_dot[end..];
        } else if let Some(after_bracket) = rest.strip_prefix('[') {
            let close = after_bracket
                .find(']')
                .ok_or_else(|| "unclosed '['".to_string())?;
            let index = after_bracket[..close]
                .trim()
                .parse()
                .map_err(|_| format!("invalid array index: {}", &after_bracket[..close]))?;
            steps.push(Step::Index(index));
            rest = &after_bracket[close + 1..];
        } else {
            return Err(format!("unexpected text '{rest}'"));
        }
    }

    Ok(steps)
}
