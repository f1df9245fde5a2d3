//! Transport double shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use restprobe_domain::{RequestSpec, ResponseSpec};
use serde_json::json;

use crate::ports::{HttpClient, HttpClientError};

/// Records every request and answers all of them with the same reply.
pub struct RecordingClient {
    requests: Mutex<Vec<RequestSpec>>,
    reply: Result<ResponseSpec, HttpClientError>,
}

impl RecordingClient {
    pub fn ok() -> Self {
        Self::with_status(200)
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Ok(ResponseSpec::json_document(status, &json!({}))),
        }
    }

    pub fn failing(error: HttpClientError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Err(error),
        }
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Option<RequestSpec> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests.lock().push(request.clone());
        self.reply.clone()
    }
}
