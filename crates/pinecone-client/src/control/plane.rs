//! Account-level operations.

use serde::Serialize;
use serde_json::Value;

use super::request::{
    ConfigureIndexRequest, CreateAssistantRequest, CreateBackupRequest, CreateCollectionRequest,
    CreateForModelRequest, CreateIndexRequest, UpdateAssistantRequest,
};
use crate::TRACING_TARGET_CONTROL;
use crate::data::PageParams;
use crate::error::Result;
use crate::http::{HttpClient, encode_segment, take_array, with_query};
use crate::models::{IndexModel, from_value};

/// Body of an index creation: the name next to the caller's fields.
#[derive(Serialize)]
struct Named<'a, T> {
    name: &'a str,
    #[serde(flatten)]
    fields: &'a T,
}

/// Control-plane facade bound to the controller host.
///
/// Covers indexes, collections, backups, restore jobs and assistants. Each
/// method is one request; identifiers are percent-encoded into the path.
#[derive(Debug, Clone)]
pub struct ControlPlane {
    http: HttpClient,
}

impl ControlPlane {
    /// Creates a facade over a client bound to the controller host.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Returns the underlying resource client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Lists every index in the project.
    pub async fn list_indexes(&self) -> Result<Vec<IndexModel>> {
        let response = self
            .http
            .get("/indexes")
            .await
            .map_err(|e| e.with_operation("Failed to list indexes"))?;

        take_array(response, "indexes")
            .into_iter()
            .map(from_value)
            .collect()
    }

    /// Creates an index. The metric defaults to cosine.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_CONTROL, fields(index = %name))]
    pub async fn create_index(&self, name: &str, request: CreateIndexRequest) -> Result<IndexModel> {
        let request = CreateIndexRequest {
            metric: Some(request.metric.unwrap_or_default()),
            ..request
        };
        let body = Named {
            name,
            fields: &request,
        };

        let response = self
            .http
            .post("/indexes", &body)
            .await
            .map_err(|e| e.with_operation(&format!("Failed to create index: {name}.")))?;

        tracing::info!(target: TRACING_TARGET_CONTROL, index = %name, "Index created");
        from_value(response)
    }

    /// Creates an index with integrated embedding for a hosted model.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_CONTROL, fields(index = %name))]
    pub async fn create_for_model(
        &self,
        name: &str,
        request: &CreateForModelRequest,
    ) -> Result<IndexModel> {
        let body = Named {
            name,
            fields: request,
        };

        let response = self
            .http
            .post("/indexes/create-for-model", &body)
            .await
            .map_err(|e| e.with_operation(&format!("Failed to create index for model: {name}.")))?;

        tracing::info!(
            target: TRACING_TARGET_CONTROL,
            index = %name,
            model = %request.embed.model,
            "Index for model created"
        );
        from_value(response)
    }

    /// Describes one index.
    pub async fn describe_index(&self, name: &str) -> Result<IndexModel> {
        let response = self.describe_index_raw(name).await?;
        from_value(response)
    }

    /// Describes one index, returning the decoded body untouched.
    pub async fn describe_index_raw(&self, name: &str) -> Result<Value> {
        self.http
            .get(&format!("/indexes/{}", encode_segment(name)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to describe index: {name}.")))
    }

    /// Deletes an index.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_CONTROL, fields(index = %name))]
    pub async fn delete_index(&self, name: &str) -> Result<()> {
        self.http
            .delete(&format!("/indexes/{}", encode_segment(name)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to delete index: {name}.")))?;

        tracing::info!(target: TRACING_TARGET_CONTROL, index = %name, "Index deleted");
        Ok(())
    }

    /// Changes the configuration of an index.
    pub async fn configure_index(
        &self,
        name: &str,
        request: &ConfigureIndexRequest,
    ) -> Result<IndexModel> {
        let response = self
            .http
            .patch(&format!("/indexes/{}", encode_segment(name)), request)
            .await
            .map_err(|e| e.with_operation(&format!("Failed to configure index: {name}.")))?;
        from_value(response)
    }

    /// Creates a collection from a pod index.
    pub async fn create_collection(&self, request: &CreateCollectionRequest) -> Result<Value> {
        self.http
            .post("/collections", request)
            .await
            .map_err(|e| e.with_operation("Failed to create collection"))
    }

    /// Lists every collection in the project.
    pub async fn list_collections(&self) -> Result<Vec<Value>> {
        let response = self
            .http
            .get("/collections")
            .await
            .map_err(|e| e.with_operation("Failed to list collections"))?;
        Ok(take_array(response, "collections"))
    }

    /// Describes one collection.
    pub async fn describe_collection(&self, name: &str) -> Result<Value> {
        self.http
            .get(&format!("/collections/{}", encode_segment(name)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to describe collection: {name}.")))
    }

    /// Deletes a collection.
    pub async fn delete_collection(&self, name: &str) -> Result<()> {
        self.http
            .delete(&format!("/collections/{}", encode_segment(name)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to delete collection: {name}.")))?;
        Ok(())
    }

    /// Creates a backup of a serverless index.
    pub async fn create_backup(&self, request: &CreateBackupRequest) -> Result<Value> {
        self.http
            .post("/backups", request)
            .await
            .map_err(|e| e.with_operation("Failed to create backup"))
    }

    /// Lists every backup in the project.
    pub async fn list_backups(&self) -> Result<Vec<Value>> {
        let response = self
            .http
            .get("/backups")
            .await
            .map_err(|e| e.with_operation("Failed to list backups"))?;
        Ok(take_array(response, "backups"))
    }

    /// Describes one backup.
    pub async fn describe_backup(&self, id: &str) -> Result<Value> {
        self.http
            .get(&format!("/backups/{}", encode_segment(id)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to describe backup: {id}.")))
    }

    /// Deletes a backup.
    pub async fn delete_backup(&self, id: &str) -> Result<()> {
        self.http
            .delete(&format!("/backups/{}", encode_segment(id)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to delete backup: {id}.")))?;
        Ok(())
    }

    /// Lists restore jobs, one page at a time.
    pub async fn list_restore_jobs(&self, params: &PageParams) -> Result<Vec<Value>> {
        let path = with_query("/restore", params.to_pairs());
        let response = self
            .http
            .get(&path)
            .await
            .map_err(|e| e.with_operation("Failed to list restore jobs"))?;
        Ok(take_array(response, "jobs"))
    }

    /// Describes one restore job.
    pub async fn describe_restore_job(&self, id: &str) -> Result<Value> {
        self.http
            .get(&format!("/restore/{}", encode_segment(id)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to describe restore job: {id}.")))
    }

    /// Creates an assistant.
    pub async fn create_assistant(&self, request: &CreateAssistantRequest) -> Result<Value> {
        self.http
            .post("/assistants", request)
            .await
            .map_err(|e| e.with_operation("Failed to create assistant"))
    }

    /// Lists every assistant in the project.
    pub async fn list_assistants(&self) -> Result<Vec<Value>> {
        let response = self
            .http
            .get("/assistants")
            .await
            .map_err(|e| e.with_operation("Failed to list assistants"))?;
        Ok(take_array(response, "assistants"))
    }

    /// Describes one assistant.
    pub async fn describe_assistant(&self, name: &str) -> Result<Value> {
        self.http
            .get(&format!("/assistants/{}", encode_segment(name)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to describe assistant: {name}.")))
    }

    /// Changes the instructions or metadata of an assistant.
    pub async fn update_assistant(
        &self,
        name: &str,
        request: &UpdateAssistantRequest,
    ) -> Result<Value> {
        self.http
            .patch(&format!("/assistants/{}", encode_segment(name)), request)
            .await
            .map_err(|e| e.with_operation(&format!("Failed to update assistant: {name}.")))
    }

    /// Deletes an assistant.
    pub async fn delete_assistant(&self, name: &str) -> Result<()> {
        self.http
            .delete(&format!("/assistants/{}", encode_segment(name)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to delete assistant: {name}.")))?;
        Ok(())
    }
}
