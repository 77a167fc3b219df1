//! Namespace-scoped view of the data plane.

use serde_json::Value;

use super::plane::DataPlane;
use super::request::{DeleteRequest, ListVectorIdsRequest, QueryRequest, UpdateRequest};
use crate::error::Result;
use crate::models::{FetchResponse, QueryResponse, Vector, VectorIdPage};

/// Data-plane view with a fixed namespace.
///
/// Requests are taken by value and their `namespace` is overwritten with
/// the view's one.
#[derive(Debug, Clone)]
pub struct IndexNamespace {
    plane: DataPlane,
    namespace: String,
}

impl IndexNamespace {
    pub(crate) fn new(plane: DataPlane, namespace: impl Into<String>) -> Self {
        Self {
            plane,
            namespace: namespace.into(),
        }
    }

    /// Returns the namespace every operation is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub async fn upsert(&self, vectors: &[Vector]) -> Result<Value> {
        self.plane.upsert(vectors, Some(&self.namespace)).await
    }

    pub async fn query(&self, request: QueryRequest) -> Result<QueryResponse> {
        let request = request.with_namespace(self.namespace.as_str());
        self.plane.query(&request).await
    }

    pub async fn fetch<S: AsRef<str>>(&self, ids: &[S]) -> Result<FetchResponse> {
        self.plane.fetch(ids, Some(&self.namespace)).await
    }

    pub async fn delete(&self, request: DeleteRequest) -> Result<Value> {
        let request = request.with_namespace(self.namespace.as_str());
        self.plane.delete(&request).await
    }

    pub async fn update(&self, request: UpdateRequest) -> Result<Value> {
        let request = request.with_namespace(self.namespace.as_str());
        self.plane.update(&request).await
    }

    pub async fn list_vector_ids(&self, request: ListVectorIdsRequest) -> Result<VectorIdPage> {
        let request = request.with_namespace(self.namespace.as_str());
        self.plane.list_vector_ids(&request).await
    }
}
