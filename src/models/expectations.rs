//! Expectations-config documents.
//!
//! The portable JSON format produced and consumed by the evaluation
//! tooling. Checkpoints can be exported to and created from this shape.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A single expectation inside an expectations config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationConfig {
    /// Expectation type, e.g. "expect_column_to_exist". Not validated
    /// client-side; failures occur at evaluation time.
    pub expectation_type: String,

    /// Expectation kwargs as a JSON object.
    pub kwargs: Value,
}

/// Portable expectations document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationsConfig {
    #[serde(default)]
    pub dataset_name: Option<String>,

    #[serde(default = "default_meta")]
    pub meta: Value,

    pub expectations: Vec<ExpectationConfig>,
}

fn default_meta() -> Value {
    json!({"great_expectations.__version__": "0.3.0"})
}

impl ExpectationsConfig {
    /// Create a config with the default meta block.
    pub fn new(expectations: Vec<ExpectationConfig>) -> Self {
        Self {
            dataset_name: None,
            meta: default_meta(),
            expectations,
        }
    }
}
