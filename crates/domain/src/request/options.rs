//! Per-call request options

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Header, Headers, QueryParam, QueryParams};

/// Options forwarded with a single call.
///
/// Every field the transport understands is listed here; there is no
/// free-form passthrough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Extra request headers
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters appended to the URL
    #[serde(default)]
    pub query: QueryParams,
    /// Timeout for this call; the transport default applies when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headers: Headers::new(),
            query: QueryParams::new(),
            timeout: None,
        }
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Adds a query parameter (builder pattern).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets the timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder() {
        let options = RequestOptions::new()
            .with_header("Accept", "application/json")
            .with_query("_limit", "2")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(options.headers.get("accept"), Some("application/json"));
        assert_eq!(options.query.len(), 1);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }
}
