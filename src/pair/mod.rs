//! High-level wrapper over the DQM GraphQL API.
//!
//! [`CooperPair`] exposes one method per supported operation, grouped by
//! entity: datasets, checkpoints, evaluations. Everything dispatches
//! through [`CooperPair::query`], which handles lazy login and token
//! refresh.

mod checkpoints;
mod datasets;
mod evaluations;
pub mod queries;

pub use checkpoints::expectations_config_from_checkpoint;

use crate::client::GraphqlTransport;
use crate::models::{PairConfig, PairError, Result};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Entrypoint to the API.
///
/// Deliberately a convenience layer over a small set of common
/// operations; anything beyond it is best expressed as a raw document
/// passed to [`CooperPair::query`], or sent to the endpoint directly.
pub struct CooperPair {
    transport: GraphqlTransport,
    email: Option<String>,
    password: Option<String>,
}

impl CooperPair {
    /// Create a new instance from configuration.
    ///
    /// Warns (does not fail) when no credentials are configured; the
    /// client then operates unauthenticated and protected operations
    /// will be rejected by the service.
    pub fn new(config: &PairConfig) -> Result<Self> {
        let endpoint = config.resolve_endpoint()?;
        let credentials = config.resolve_credentials()?;

        if credentials.is_none() {
            warn!(
                "CooperPair created without credentials; call login_with or \
                 configure email and password to authenticate"
            );
        }

        let (email, password) = match credentials {
            Some((email, password)) => (Some(email), Some(password)),
            None => (None, None),
        };

        Ok(Self {
            transport: GraphqlTransport::new(endpoint, config.timeout_secs, config.max_retries)?,
            email,
            password,
        })
    }

    /// Create an unauthenticated instance from an endpoint URL.
    pub fn connect(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(&PairConfig::new(endpoint))
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Get the current session token, if logged in.
    pub async fn token(&self) -> Option<String> {
        self.transport.token().await
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        self.transport.http_client()
    }

    /// Log in with the configured credentials.
    ///
    /// Returns `false` (with a warning) when credentials are missing or
    /// the service returns an empty token.
    pub async fn login(&self) -> Result<bool> {
        let (Some(email), Some(password)) = (self.email.clone(), self.password.clone()) else {
            warn!("Must provide email and password to login");
            return Ok(false);
        };

        self.login_with(&email, &password).await
    }

    /// Log in with explicit credentials.
    pub async fn login_with(&self, email: &str, password: &str) -> Result<bool> {
        let data = self
            .transport
            .execute(
                queries::LOGIN,
                Some(json!({
                    "input": {
                        "email": email,
                        "password": password,
                    }
                })),
            )
            .await?;

        let token = data
            .pointer("/login/token")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if token.is_empty() {
            warn!("Login did not return a token; check the provided credentials");
            self.transport.clear_token().await;
            return Ok(false);
        }

        self.transport.set_token(token).await;
        Ok(true)
    }

    /// Log in lazily when credentials are present and no token is stored.
    async fn ensure_authenticated(&self) -> Result<()> {
        if self.transport.has_token().await {
            return Ok(());
        }

        if self.email.is_some() && self.password.is_some() {
            self.login().await?;
        }

        Ok(())
    }

    /// Workhorse to execute documents.
    ///
    /// Warns when dispatching without a token. On an HTTP-level failure
    /// the stored token is dropped and the request retried once after
    /// re-authenticating, so a token that expired mid-session does not
    /// fail the call.
    pub async fn query(&self, document: &str, variables: Option<Value>) -> Result<Value> {
        self.ensure_authenticated().await?;

        if !self.transport.has_token().await {
            warn!("Client not authenticated; expect protected operations to fail");
        }

        match self.transport.execute(document, variables.clone()).await {
            Err(PairError::Api { status, .. }) => {
                debug!(status, "HTTP failure; refreshing token and retrying once");
                self.transport.clear_token().await;
                self.ensure_authenticated().await?;
                self.transport.execute(document, variables).await
            }
            other => other,
        }
    }

    /// List all configured notifications.
    pub async fn list_configured_notifications(&self) -> Result<Value> {
        self.query(queries::ALL_CONFIGURED_NOTIFICATIONS, None).await
    }
}

/// Generate a URL slug from a display name.
// TODO: slug generation belongs on the server
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("My Cool Checkpoint"), "my-cool-checkpoint");
        assert_eq!(generate_slug("already-a-slug"), "already-a-slug");
        assert_eq!(generate_slug(""), "");
    }
}
