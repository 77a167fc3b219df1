//! Vector operations against one index host.

use std::borrow::Cow;

use serde_json::Value;

use super::request::{DeleteRequest, ListVectorIdsRequest, QueryRequest, UpdateRequest, UpsertBody};
use crate::TRACING_TARGET_DATA;
use crate::error::{Error, Result};
use crate::http::{HttpClient, with_query};
use crate::models::{FetchResponse, QueryResponse, Vector, VectorIdPage, from_value};

/// Data-plane facade bound to one index host.
///
/// Stateless: every method translates its arguments into exactly one
/// request. Namespaces are passed per call; see
/// [`IndexNamespace`](super::IndexNamespace) for a view with a fixed one.
#[derive(Debug, Clone)]
pub struct DataPlane {
    http: HttpClient,
}

impl DataPlane {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Returns the underlying resource client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Writes vectors, replacing records with the same id.
    ///
    /// Returns the decoded body, normally `{"upsertedCount": n}`.
    pub async fn upsert(&self, vectors: &[Vector], namespace: Option<&str>) -> Result<Value> {
        tracing::debug!(
            target: TRACING_TARGET_DATA,
            count = vectors.len(),
            namespace = namespace.unwrap_or_default(),
            "Upserting vectors"
        );

        let body = UpsertBody { vectors, namespace };
        self.http
            .post("/vectors/upsert", &body)
            .await
            .map_err(|e| e.with_operation("Failed to upsert vectors"))
    }

    /// Runs a similarity query.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let response = self
            .http
            .post("/query", request)
            .await
            .map_err(|e| e.with_operation("Failed to query vectors"))?;
        from_value(response)
    }

    /// Fetches vectors by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without sending anything when `ids` is
    /// empty.
    pub async fn fetch<S>(&self, ids: &[S], namespace: Option<&str>) -> Result<FetchResponse>
    where
        S: AsRef<str>,
    {
        if ids.is_empty() {
            return Err(Error::validation(
                "At least one vector ID is required for fetch.",
            ));
        }

        let pairs = ids
            .iter()
            .map(|id| ("ids", Cow::Borrowed(id.as_ref())))
            .chain(namespace.map(|ns| ("namespace", Cow::Borrowed(ns))));
        let path = with_query("/vectors/fetch", pairs);

        let response = self
            .http
            .get(&path)
            .await
            .map_err(|e| e.with_operation("Failed to fetch vectors"))?;
        from_value(response)
    }

    /// Deletes vectors by id, by filter, or all of them.
    pub async fn delete(&self, request: &DeleteRequest) -> Result<Value> {
        self.http
            .post("/vectors/delete", request)
            .await
            .map_err(|e| e.with_operation("Failed to delete vectors"))
    }

    /// Updates values, sparse values or metadata of one vector.
    pub async fn update(&self, request: &UpdateRequest) -> Result<Value> {
        self.http
            .post("/vectors/update", request)
            .await
            .map_err(|e| e.with_operation("Failed to update vector"))
    }

    /// Lists vector ids, one page at a time.
    pub async fn list_vector_ids(&self, request: &ListVectorIdsRequest) -> Result<VectorIdPage> {
        let path = with_query("/vectors/list", request.to_pairs());
        let response = self
            .http
            .get(&path)
            .await
            .map_err(|e| e.with_operation("Failed to list vector IDs"))?;
        from_value(response)
    }
}
