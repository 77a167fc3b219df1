//! Handle on one index: data plane plus index-level operations.

use serde::Serialize;
use serde_json::Value;

use super::namespace::IndexNamespace;
use super::plane::DataPlane;
use super::request::{
    DeleteRequest, ListVectorIdsRequest, PageParams, QueryRequest, StartImportRequest,
    UpdateRequest,
};
use crate::TRACING_TARGET_DATA;
use crate::error::Result;
use crate::http::{HttpClient, encode_segment, with_query};
use crate::models::{
    FetchResponse, IndexStats, NamespaceSummary, QueryResponse, Vector, VectorIdPage, from_value,
};

#[derive(Serialize)]
struct StatsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Value>,
}

/// A resolved index.
///
/// Obtained from [`Pinecone::index`](crate::Pinecone::index), which
/// discovers the host once and caches the handle. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Index {
    name: String,
    plane: DataPlane,
}

impl Index {
    /// Creates a handle for `name` whose data plane lives behind `http`.
    pub fn new(name: impl Into<String>, http: HttpClient) -> Self {
        Self {
            name: name.into(),
            plane: DataPlane::new(http),
        }
    }

    /// Returns the index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base URL of the index host.
    pub fn host(&self) -> &str {
        self.plane.http().base_url()
    }

    /// Returns the data-plane facade.
    pub fn data_plane(&self) -> &DataPlane {
        &self.plane
    }

    /// Returns a view whose operations are scoped to `namespace`.
    pub fn namespace(&self, namespace: impl Into<String>) -> IndexNamespace {
        IndexNamespace::new(self.plane.clone(), namespace)
    }

    /// Returns vector counts per namespace, optionally restricted by a
    /// metadata filter.
    pub async fn describe_index_stats(&self, filter: Option<&Value>) -> Result<IndexStats> {
        self.stats(filter, "Failed to describe index stats").await
    }

    async fn stats(&self, filter: Option<&Value>, operation: &str) -> Result<IndexStats> {
        let response = self
            .plane
            .http()
            .post("/describe_index_stats", &StatsBody { filter })
            .await
            .map_err(|e| e.with_operation(operation))?;
        from_value(response)
    }

    /// Starts a bulk import. The decoded body carries the import id.
    pub async fn start_import(&self, request: &StartImportRequest) -> Result<Value> {
        tracing::info!(
            target: TRACING_TARGET_DATA,
            index = %self.name,
            uri = %request.uri,
            "Starting bulk import"
        );

        self.plane
            .http()
            .post("/bulk/imports", request)
            .await
            .map_err(|e| e.with_operation("Failed to start import"))
    }

    pub async fn list_imports(&self, params: &PageParams) -> Result<Value> {
        let path = with_query("/bulk/imports", params.to_pairs());
        self.plane
            .http()
            .get(&path)
            .await
            .map_err(|e| e.with_operation("Failed to list imports"))
    }

    pub async fn describe_import(&self, id: &str) -> Result<Value> {
        self.plane
            .http()
            .get(&format!("/bulk/imports/{}", encode_segment(id)))
            .await
            .map_err(|e| e.with_operation("Failed to describe import"))
    }

    pub async fn cancel_import(&self, id: &str) -> Result<()> {
        self.plane
            .http()
            .delete(&format!("/bulk/imports/{}", encode_segment(id)))
            .await
            .map_err(|e| e.with_operation("Failed to cancel import"))?;
        Ok(())
    }

    /// Returns the names of namespaces that hold vectors.
    pub async fn list_namespaces(&self) -> Result<Vec<String>> {
        let stats = self.stats(None, "Failed to list namespaces").await?;
        Ok(stats.namespaces.into_keys().collect())
    }

    /// Returns the summary of one namespace, or `None` if it holds no
    /// vectors.
    pub async fn describe_namespace(&self, namespace: &str) -> Result<Option<NamespaceSummary>> {
        let mut stats = self.stats(None, "Failed to describe namespace").await?;
        Ok(stats.namespaces.remove(namespace))
    }

    /// Deletes every vector of a namespace.
    pub async fn delete_namespace(&self, namespace: &str) -> Result<()> {
        tracing::info!(
            target: TRACING_TARGET_DATA,
            index = %self.name,
            namespace,
            "Deleting namespace"
        );

        self.plane
            .http()
            .post("/vectors/delete", &DeleteRequest::all().with_namespace(namespace))
            .await
            .map_err(|e| e.with_operation("Failed to delete namespace"))?;
        Ok(())
    }

    pub async fn upsert(&self, vectors: &[Vector], namespace: Option<&str>) -> Result<Value> {
        self.plane.upsert(vectors, namespace).await
    }

    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        self.plane.query(request).await
    }

    pub async fn fetch<S: AsRef<str>>(
        &self,
        ids: &[S],
        namespace: Option<&str>,
    ) -> Result<FetchResponse> {
        self.plane.fetch(ids, namespace).await
    }

    pub async fn delete(&self, request: &DeleteRequest) -> Result<Value> {
        self.plane.delete(request).await
    }

    pub async fn update(&self, request: &UpdateRequest) -> Result<Value> {
        self.plane.update(request).await
    }

    pub async fn list_vector_ids(&self, request: &ListVectorIdsRequest) -> Result<VectorIdPage> {
        self.plane.list_vector_ids(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_stats_body() {
        assert_eq!(
            serde_json::to_value(StatsBody { filter: None }).unwrap(),
            json!({})
        );
        let filter = json!({"genre": "drama"});
        assert_eq!(
            serde_json::to_value(StatsBody {
                filter: Some(&filter)
            })
            .unwrap(),
            json!({"filter": {"genre": "drama"}})
        );
    }
}
