//! Generic HTTP-verb client bound to a base URL.

use std::sync::Arc;

use restprobe_domain::{HttpMethod, RequestBody, RequestOptions, RequestSpec, ResponseSpec};
use serde::Serialize;

use crate::{ApplicationResult, ports::HttpClient};

/// Issues requests relative to a fixed base URL.
///
/// Responses are returned unmodified whatever their status; only
/// transport failures and body encoding problems surface as errors.
///
/// # Example
///
/// ```ignore
/// let client = ApiClient::new("https://jsonplaceholder.typicode.com", Arc::new(transport));
/// let response = client.get("/posts/1", &RequestOptions::new()).await?;
/// assert_eq!(response.status, 200);
/// ```
pub struct ApiClient<C: HttpClient + ?Sized> {
    base_url: String,
    client: Arc<C>,
}

impl<C: HttpClient + ?Sized> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient + ?Sized> ApiClient<C> {
    /// Creates a client for `base_url`. A single trailing `/` is dropped so
    /// that endpoints starting with `/` join cleanly.
    pub fn new(base_url: impl Into<String>, client: Arc<C>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the absolute URL for an endpoint suffix.
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Http` if the transport fails.
    pub async fn get(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> ApplicationResult<ResponseSpec> {
        self.send(HttpMethod::Get, endpoint, RequestBody::none(), options)
            .await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if `body` cannot be encoded, or
    /// `ApplicationError::Http` if the transport fails.
    pub async fn post<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ApplicationResult<ResponseSpec> {
        let body = RequestBody::json(body)?;
        self.send(HttpMethod::Post, endpoint, body, options).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if `body` cannot be encoded, or
    /// `ApplicationError::Http` if the transport fails.
    pub async fn put<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ApplicationResult<ResponseSpec> {
        let body = RequestBody::json(body)?;
        self.send(HttpMethod::Put, endpoint, body, options).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if `body` cannot be encoded, or
    /// `ApplicationError::Http` if the transport fails.
    pub async fn patch<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ApplicationResult<ResponseSpec> {
        let body = RequestBody::json(body)?;
        self.send(HttpMethod::Patch, endpoint, body, options).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Http` if the transport fails.
    pub async fn delete(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> ApplicationResult<ResponseSpec> {
        self.send(HttpMethod::Delete, endpoint, RequestBody::none(), options)
            .await
    }

    /// Sends one request with an arbitrary method and body.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if a header name is not a valid
    /// HTTP token, or `ApplicationError::Http` if the transport fails.
    pub async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: RequestBody,
        options: &RequestOptions,
    ) -> ApplicationResult<ResponseSpec> {
        let request = RequestSpec::new(method, self.url_for(endpoint))
            .with_body(body)
            .with_options(options);
        for header in request.headers.iter() {
            header.validate()?;
        }

        tracing::debug!(request_id = %request.id, %method, url = %request.url, "sending request");
        let response = self.client.execute(&request).await?;
        tracing::debug!(
            request_id = %request.id,
            status = response.status,
            elapsed = %response.duration_display(),
            "received response"
        );

        Ok(response)
    }
}
