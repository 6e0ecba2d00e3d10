//! Connection configuration for the DQM GraphQL API.
//!
//! The client holds no state beyond what is configured here: the endpoint
//! URL, optional login credentials, and transport bounds.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a [`CooperPair`](crate::CooperPair) session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    /// GraphQL endpoint URL (can also be set via the DQM_GRAPHQL_URL env var)
    #[serde(default)]
    pub graphql_endpoint: Option<String>,

    /// Environment variable consulted when `graphql_endpoint` is unset
    #[serde(default = "default_endpoint_env")]
    pub endpoint_env: String,

    /// Account email for the login mutation
    #[serde(default)]
    pub email: Option<String>,

    /// Account password (prefer `password_env` outside local development)
    #[serde(default)]
    pub password: Option<String>,

    /// Environment variable consulted when `password` is unset
    #[serde(default)]
    pub password_env: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum attempts for transient network failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_endpoint_env() -> String {
    "DQM_GRAPHQL_URL".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: None,
            endpoint_env: default_endpoint_env(),
            email: None,
            password: None,
            password_env: None,
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl PairConfig {
    /// Create a configuration with an explicit endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            graphql_endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Attach login credentials.
    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.password = Some(password.into());
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Resolve the endpoint URL from config or environment.
    pub fn resolve_endpoint(&self) -> Result<String, ConfigError> {
        if let Some(endpoint) = &self.graphql_endpoint {
            return Ok(expand_env_vars(endpoint));
        }

        std::env::var(&self.endpoint_env).map_err(|_| ConfigError::MissingEndpoint {
            env_var: self.endpoint_env.clone(),
        })
    }

    /// Resolve login credentials, if any are configured.
    ///
    /// Returns `Ok(None)` when the account is simply not configured; the
    /// client then operates unauthenticated. An explicitly configured
    /// `password_env` pointing at an unset variable is an error.
    pub fn resolve_credentials(&self) -> Result<Option<(String, String)>, ConfigError> {
        let Some(email) = &self.email else {
            return Ok(None);
        };

        if let Some(password) = &self.password {
            return Ok(Some((email.clone(), expand_env_vars(password))));
        }

        if let Some(env_var) = &self.password_env {
            return match std::env::var(env_var) {
                Ok(password) => Ok(Some((email.clone(), password))),
                Err(_) => Err(ConfigError::MissingPassword {
                    email: email.clone(),
                    env_var: env_var.clone(),
                }),
            };
        }

        Ok(None)
    }
}

/// Expand environment variables in a string.
///
/// Supports ${VAR_NAME} syntax. Unset variables are left unchanged.
pub fn expand_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    for cap in re.captures_iter(s) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing GraphQL endpoint: set {env_var} or graphql_endpoint in config")]
    MissingEndpoint { env_var: String },

    #[error("Missing password for '{email}': set {env_var}")]
    MissingPassword { email: String, env_var: String },
}
