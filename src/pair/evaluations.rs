//! Evaluation operations: running checkpoints against datasets.

use super::{queries, CooperPair};
use crate::models::{PairError, Result};
use serde_json::{json, Map, Value};
use std::path::Path;

impl CooperPair {
    /// Add a new evaluation of a checkpoint against a dataset.
    ///
    /// The evaluation itself runs remotely; poll
    /// [`CooperPair::get_evaluation`] for its status.
    pub async fn add_evaluation(&self, dataset_id: &str, checkpoint_id: &str) -> Result<Value> {
        self.query(
            queries::ADD_EVALUATION,
            Some(json!({
                "evaluation": {
                    "datasetId": dataset_id,
                    "checkpointId": checkpoint_id,
                }
            })),
        )
        .await
    }

    /// Retrieve an evaluation by its id.
    pub async fn get_evaluation(&self, evaluation_id: &str) -> Result<Value> {
        self.query(queries::EVALUATION, Some(json!({ "id": evaluation_id })))
            .await
    }

    /// Update an evaluation's status or results. Only supplied fields
    /// are sent.
    pub async fn update_evaluation(
        &self,
        evaluation_id: &str,
        status: Option<&str>,
        results: Option<Vec<Value>>,
    ) -> Result<Value> {
        let mut input = Map::new();
        input.insert("id".to_string(), json!(evaluation_id));
        if let Some(status) = status {
            input.insert("status".to_string(), json!(status));
        }
        if let Some(results) = results {
            input.insert("results".to_string(), Value::Array(results));
        }

        self.query(
            queries::UPDATE_EVALUATION,
            Some(json!({ "updateEvaluation": Value::Object(input) })),
        )
        .await
    }

    /// Evaluate a checkpoint on a file: upload the file as a dataset,
    /// then create the evaluation.
    pub async fn evaluate_checkpoint_on_path(
        &self,
        checkpoint_id: &str,
        path: &Path,
        project_id: &str,
        filename: Option<&str>,
    ) -> Result<Value> {
        let dataset = self
            .add_dataset_from_path(path, project_id, filename)
            .await?;
        let dataset_id = dataset_id_of(&dataset)?;
        self.add_evaluation(&dataset_id, checkpoint_id).await
    }

    /// Evaluate a checkpoint on in-memory contents.
    pub async fn evaluate_checkpoint_on_bytes(
        &self,
        checkpoint_id: &str,
        contents: Vec<u8>,
        project_id: &str,
        filename: &str,
    ) -> Result<Value> {
        let dataset = self
            .add_dataset_from_bytes(contents, project_id, filename)
            .await?;
        let dataset_id = dataset_id_of(&dataset)?;
        self.add_evaluation(&dataset_id, checkpoint_id).await
    }
}

fn dataset_id_of(dataset: &Value) -> Result<String> {
    dataset
        .pointer("/dataset/id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PairError::Parse("dataset response missing id".to_string()))
}
