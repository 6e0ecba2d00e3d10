//! Checkpoint and expectation operations.

use super::{generate_slug, queries, CooperPair};
use crate::models::{ExpectationConfig, ExpectationsConfig, PairError, Result};
use serde_json::{json, Map, Value};

impl CooperPair {
    /// Add a new checkpoint.
    ///
    /// `autoinspect` populates the checkpoint with single-column
    /// expectations generated from a dataset; it requires `dataset_id`,
    /// and `dataset_id` is rejected without it.
    pub async fn add_checkpoint(
        &self,
        name: &str,
        autoinspect: bool,
        dataset_id: Option<&str>,
    ) -> Result<Value> {
        if autoinspect && dataset_id.is_none() {
            return Err(PairError::InvalidInput(
                "Must pass a dataset id when autoinspecting".to_string(),
            ));
        }
        if !autoinspect && dataset_id.is_some() {
            return Err(PairError::InvalidInput(
                "Do not pass a dataset id if not autoinspecting".to_string(),
            ));
        }

        self.query(
            queries::ADD_CHECKPOINT,
            Some(json!({
                "checkpoint": {
                    "name": name,
                    "slug": generate_slug(name),
                    "autoinspect": autoinspect,
                    "datasetId": dataset_id,
                }
            })),
        )
        .await
    }

    /// Retrieve a checkpoint with its expectations.
    pub async fn get_checkpoint(&self, checkpoint_id: &str) -> Result<Value> {
        self.query(queries::CHECKPOINT, Some(json!({ "id": checkpoint_id })))
            .await
    }

    /// List all checkpoints by id and name.
    pub async fn list_checkpoints(&self) -> Result<Value> {
        self.query(queries::ALL_CHECKPOINTS, None).await
    }

    /// List all checkpoints with their full expectation connections.
    pub async fn list_checkpoints_with_expectations(&self) -> Result<Value> {
        self.query(queries::ALL_CHECKPOINTS_WITH_EXPECTATIONS, None)
            .await
    }

    /// Update an existing checkpoint.
    ///
    /// At least one of `autoinspection_status`, `expectations`, or
    /// `sections` must be supplied; `expectations` and `sections` cannot
    /// be combined in a single update. Expectation semantics are append.
    pub async fn update_checkpoint(
        &self,
        checkpoint_id: &str,
        autoinspection_status: Option<&str>,
        expectations: Option<Vec<Value>>,
        sections: Option<Vec<Value>>,
    ) -> Result<Value> {
        if autoinspection_status.is_none() && expectations.is_none() && sections.is_none() {
            return Err(PairError::InvalidInput(
                "Must update one of autoinspection_status, expectations, or sections".to_string(),
            ));
        }
        if expectations.is_some() && sections.is_some() {
            return Err(PairError::InvalidInput(
                "Cannot update expectations and sections in the same call".to_string(),
            ));
        }

        let mut input = Map::new();
        input.insert("id".to_string(), json!(checkpoint_id));
        if let Some(status) = autoinspection_status {
            input.insert("autoinspectionStatus".to_string(), json!(status));
        }
        if let Some(expectations) = expectations {
            input.insert("expectations".to_string(), Value::Array(expectations));
        }
        if let Some(sections) = sections {
            input.insert("sections".to_string(), Value::Array(sections));
        }

        self.query(
            queries::UPDATE_CHECKPOINT,
            Some(json!({ "updateCheckpoint": Value::Object(input) })),
        )
        .await
    }

    /// Add an expectation to a checkpoint.
    ///
    /// `expectation_kwargs` must be a valid JSON document. Neither the
    /// type nor the kwargs are otherwise validated client- or
    /// server-side; failures occur at evaluation time.
    pub async fn add_expectation(
        &self,
        checkpoint_id: &str,
        expectation_type: &str,
        expectation_kwargs: &str,
    ) -> Result<Value> {
        validate_kwargs(expectation_kwargs)?;

        self.query(
            queries::ADD_EXPECTATION,
            Some(json!({
                "expectation": {
                    "checkpointId": checkpoint_id,
                    "expectationType": expectation_type,
                    "expectationKwargs": expectation_kwargs,
                }
            })),
        )
        .await
    }

    /// Retrieve an expectation by its id.
    pub async fn get_expectation(&self, expectation_id: &str) -> Result<Value> {
        self.query(queries::EXPECTATION, Some(json!({ "id": expectation_id })))
            .await
    }

    /// Update an existing expectation.
    ///
    /// At least one field must be supplied. When `expectation_kwargs` is
    /// present the existing kwargs are overwritten wholesale, so updates
    /// must carry all unchanged keys.
    pub async fn update_expectation(
        &self,
        expectation_id: &str,
        expectation_type: Option<&str>,
        expectation_kwargs: Option<&str>,
        is_activated: Option<bool>,
    ) -> Result<Value> {
        if expectation_type.is_none() && expectation_kwargs.is_none() && is_activated.is_none() {
            return Err(PairError::InvalidInput(
                "Must provide expectation_type, expectation_kwargs, or is_activated".to_string(),
            ));
        }
        if let Some(kwargs) = expectation_kwargs {
            validate_kwargs(kwargs)?;
        }

        let mut input = Map::new();
        input.insert("id".to_string(), json!(expectation_id));
        if let Some(expectation_type) = expectation_type {
            input.insert("expectationType".to_string(), json!(expectation_type));
        }
        if let Some(kwargs) = expectation_kwargs {
            input.insert("expectationKwargs".to_string(), json!(kwargs));
        }
        if let Some(is_activated) = is_activated {
            input.insert("isActivated".to_string(), json!(is_activated));
        }

        self.query(
            queries::UPDATE_EXPECTATION,
            Some(json!({ "expectation": Value::Object(input) })),
        )
        .await
    }

    /// Create a checkpoint from an expectations config document.
    ///
    /// Two round trips today: create the checkpoint, then append the
    /// config's expectations. Returns the update mutation's payload.
    pub async fn add_checkpoint_from_expectations_config(
        &self,
        config: &ExpectationsConfig,
        name: &str,
    ) -> Result<Value> {
        let created = self.add_checkpoint(name, false, None).await?;
        let checkpoint_id = created
            .pointer("/addCheckpoint/checkpoint/id")
            .and_then(Value::as_str)
            .ok_or_else(|| PairError::Parse("addCheckpoint response missing id".to_string()))?
            .to_string();

        let expectations = config
            .expectations
            .iter()
            .map(|expectation| {
                json!({
                    "expectationType": expectation.expectation_type,
                    "expectationKwargs": expectation.kwargs.to_string(),
                })
            })
            .collect();

        self.update_checkpoint(&checkpoint_id, None, Some(expectations), None)
            .await
    }

    /// Retrieve a checkpoint as an expectations config document.
    ///
    /// Deactivated expectations are filtered unless `include_inactive`.
    pub async fn get_checkpoint_as_expectations_config(
        &self,
        checkpoint_id: &str,
        include_inactive: bool,
    ) -> Result<ExpectationsConfig> {
        let checkpoint = self.get_checkpoint(checkpoint_id).await?;
        expectations_config_from_checkpoint(&checkpoint, include_inactive)
    }

    /// Retrieve a checkpoint's expectations config as pretty JSON.
    pub async fn get_checkpoint_as_json_string(
        &self,
        checkpoint_id: &str,
        include_inactive: bool,
    ) -> Result<String> {
        let config = self
            .get_checkpoint_as_expectations_config(checkpoint_id, include_inactive)
            .await?;

        serde_json::to_string_pretty(&config)
            .map_err(|e| PairError::Parse(format!("Serializing expectations config: {e}")))
    }
}

fn validate_kwargs(expectation_kwargs: &str) -> Result<()> {
    serde_json::from_str::<Value>(expectation_kwargs).map_err(|e| {
        PairError::InvalidInput(format!("expectation_kwargs must be valid JSON: {e}"))
    })?;
    Ok(())
}

/// Project a checkpoint query payload into an expectations config.
pub fn expectations_config_from_checkpoint(
    data: &Value,
    include_inactive: bool,
) -> Result<ExpectationsConfig> {
    let edges = data
        .pointer("/checkpoint/expectations/edges")
        .and_then(Value::as_array)
        .ok_or_else(|| PairError::Parse("checkpoint response missing expectations".to_string()))?;

    let mut expectations = Vec::new();
    for edge in edges {
        let node = edge
            .get("node")
            .ok_or_else(|| PairError::Parse("expectation edge missing node".to_string()))?;

        let is_activated = node
            .get("isActivated")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !include_inactive && !is_activated {
            continue;
        }

        let expectation_type = node
            .get("expectationType")
            .and_then(Value::as_str)
            .ok_or_else(|| PairError::Parse("expectation missing expectationType".to_string()))?;
        let raw_kwargs = node
            .get("expectationKwargs")
            .and_then(Value::as_str)
            .unwrap_or("{}");
        let kwargs = serde_json::from_str(raw_kwargs).map_err(|e| {
            PairError::Parse(format!("Invalid expectationKwargs for {expectation_type}: {e}"))
        })?;

        expectations.push(ExpectationConfig {
            expectation_type: expectation_type.to_string(),
            kwargs,
        });
    }

    Ok(ExpectationsConfig::new(expectations))
}
