//! HTTP client facade for the library API
//!
//! One method per remote action, each serializing its payload as JSON and
//! decoding the JSON reply. Errors are normalized to [`ClientError`]: a
//! non-success status becomes `Request` (with the server's `message` field
//! when one can be parsed out of the body), a request that never completed
//! becomes `Transport`. No retries, no timeout, no caching.

pub mod books;
pub mod loans;
pub mod members;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    config::ApiConfig,
    error::{ClientError, ClientResult, ErrorBody},
};

/// Thin wrapper over a shared [`reqwest::Client`] and the API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request without a body and decode the JSON reply
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> ClientResult<T> {
        let request = self.request(method, path);
        self.execute(path, request).await
    }

    /// Send a request with a JSON body and decode the JSON reply
    ///
    /// `.json()` sets the `Content-Type: application/json` header.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> ClientResult<T> {
        let request = self.request(method, path).json(body);
        self.execute(path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("API request to {} failed: {}", path, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            // Best-effort parse of the error body for a readable message
            let body = response.json::<ErrorBody>().await.ok();
            let err = ClientError::from_status(status, body);
            tracing::debug!("API request to {} rejected: {}", path, err);
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to decode reply from {}: {}", path, e);
            ClientError::Transport(e)
        })
    }
}
