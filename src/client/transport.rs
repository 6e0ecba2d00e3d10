//! HTTP transport for the GraphQL endpoint.
//!
//! One POST per operation. Transient network failures are retried with
//! exponential backoff up to the configured bound; everything else is
//! surfaced to the caller unchanged.

use crate::models::{GraphqlResponse, PairError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Header carrying the session token issued by the login mutation.
pub const TOKEN_HEADER: &str = "X-Fullerene-Token";

/// Low-level GraphQL dispatcher.
///
/// Holds the endpoint session: URL, transport bounds, and the auth token
/// once one has been issued. Most callers want [`CooperPair`] instead.
///
/// [`CooperPair`]: crate::CooperPair
pub struct GraphqlTransport {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    max_retries: u32,
    token: RwLock<Option<String>>,
}

impl GraphqlTransport {
    /// Create a new transport against an endpoint URL.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64, max_retries: u32) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PairError::Network)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
            max_retries: max_retries.max(1),
            token: RwLock::new(None),
        })
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the stored session token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Check whether a session token is stored.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Store a session token for subsequent requests.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Drop the stored session token.
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Build headers for a request.
    async fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token.read().await.as_deref() {
            if let Ok(value) = HeaderValue::from_str(token) {
                headers.insert(TOKEN_HEADER, value);
            }
        }

        headers
    }

    /// Execute a GraphQL document against the endpoint.
    ///
    /// Posts the standard `{"query", "variables"}` body, maps non-2xx
    /// statuses to [`PairError::Api`], and decodes the response envelope.
    pub async fn execute(&self, document: &str, variables: Option<Value>) -> Result<Value> {
        let body = json!({
            "query": document,
            "variables": variables.unwrap_or_else(|| json!({})),
        });

        let mut last_error: Option<PairError> = None;

        for attempt in 0..self.max_retries {
            let response = self
                .client
                .post(&self.endpoint)
                .headers(self.headers().await)
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(if e.is_timeout() {
                        PairError::Timeout(self.timeout)
                    } else {
                        PairError::Network(e)
                    });
                    if attempt + 1 < self.max_retries {
                        let backoff = Duration::from_secs(2u64.pow(attempt));
                        debug!(
                            attempt,
                            backoff_secs = backoff.as_secs(),
                            "Retrying after network error"
                        );
                        tokio::time::sleep(backoff).await;
                    }
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(PairError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let envelope: GraphqlResponse = response
                .json()
                .await
                .map_err(|e| PairError::Parse(format!("Failed to decode response: {e}")))?;

            return envelope.into_result();
        }

        Err(last_error
            .unwrap_or_else(|| PairError::Parse("Request retry loop exhausted".to_string())))
    }
}
