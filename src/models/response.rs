//! GraphQL response envelope.
//!
//! The service answers every request with the standard `{data, errors}`
//! envelope. A non-empty error list converts to a typed error; the client
//! never inspects it further.

use crate::models::{PairError, Result};
use serde::Deserialize;
use serde_json::Value;

/// A single error reported by the GraphQL service.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<GraphqlLocation>,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
    #[serde(default)]
    pub extensions: Option<Value>,
}

/// Source position of a GraphQL error.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GraphqlLocation {
    pub line: u32,
    pub column: u32,
}

/// Error list with a readable display form.
#[derive(Debug, Clone)]
pub struct GraphqlErrorList(pub Vec<GraphqlError>);

impl std::fmt::Display for GraphqlErrorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    /// Convert into the `data` payload, surfacing the error list if present.
    pub fn into_result(self) -> Result<Value> {
        if !self.errors.is_empty() {
            return Err(PairError::Graphql(GraphqlErrorList(self.errors)));
        }

        self.data
            .ok_or_else(|| PairError::Parse("Response contained neither data nor errors".to_string()))
    }
}
