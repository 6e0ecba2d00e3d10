//! Dataset operations: creation, content upload, retrieval.

use super::{queries, CooperPair};
use crate::client::upload_to_presigned_post;
use crate::models::{PairError, Result};
use serde_json::{json, Value};
use std::path::Path;

impl CooperPair {
    /// Add a new dataset record.
    ///
    /// Callers normally want [`CooperPair::add_dataset_from_path`] or
    /// [`CooperPair::add_dataset_from_bytes`], which also upload content.
    pub async fn add_dataset(&self, filename: &str, project_id: &str) -> Result<Value> {
        self.query(
            queries::ADD_DATASET,
            Some(json!({
                "dataset": {
                    "filename": filename,
                    "projectId": project_id,
                }
            })),
        )
        .await
    }

    /// Retrieve a dataset by its id.
    pub async fn get_dataset(&self, dataset_id: &str) -> Result<Value> {
        self.query(queries::DATASET, Some(json!({ "id": dataset_id })))
            .await
    }

    /// List all datasets.
    pub async fn list_datasets(&self) -> Result<Value> {
        self.query(queries::ALL_DATASETS, None).await
    }

    /// Upload dataset contents to a presigned POST URL.
    pub async fn upload_dataset(
        &self,
        presigned_post: &str,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<()> {
        upload_to_presigned_post(self.http_client(), presigned_post, filename, contents).await
    }

    /// Add a dataset and upload its contents from a file on disk.
    ///
    /// The filename defaults to the final path component. Returns the
    /// dataset record re-fetched after the upload.
    pub async fn add_dataset_from_path(
        &self,
        path: &Path,
        project_id: &str,
        filename: Option<&str>,
    ) -> Result<Value> {
        let name = match filename {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    PairError::InvalidInput(format!(
                        "Cannot derive a filename from {}",
                        path.display()
                    ))
                })?,
        };

        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| PairError::io(format!("reading dataset {}", path.display()), e))?;

        self.add_dataset_from_bytes(contents, project_id, &name).await
    }

    /// Add a dataset and upload in-memory contents.
    pub async fn add_dataset_from_bytes(
        &self,
        contents: Vec<u8>,
        project_id: &str,
        filename: &str,
    ) -> Result<Value> {
        let created = self.add_dataset(filename, project_id).await?;

        let dataset = created
            .pointer("/addDataset/dataset")
            .ok_or_else(|| PairError::Parse("addDataset response missing dataset".to_string()))?;
        let presigned = dataset
            .get("s3Url")
            .and_then(Value::as_str)
            .ok_or_else(|| PairError::Parse("addDataset response missing s3Url".to_string()))?;
        let dataset_id = dataset
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| PairError::Parse("addDataset response missing id".to_string()))?
            .to_string();

        self.upload_dataset(presigned, filename, contents).await?;

        self.get_dataset(&dataset_id).await
    }
}
