//! Request bodies and query parameters of the data plane.

use std::borrow::Cow;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

use crate::models::{SparseValues, Vector};

/// Default number of matches returned by a query.
pub const DEFAULT_TOP_K: u32 = 10;

#[derive(Serialize)]
pub(crate) struct UpsertBody<'a> {
    pub vectors: &'a [Vector],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<&'a str>,
}

/// Similarity query.
///
/// Either `vector` or `id` normally names the query point; sending both or
/// neither is left for the service to reject.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vector: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub top_k: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub include_values: bool,
    pub include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse_vector: Option<SparseValues>,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            vector: Vec::new(),
            id: None,
            top_k: DEFAULT_TOP_K,
            filter: None,
            namespace: None,
            include_values: false,
            include_metadata: true,
            sparse_vector: None,
        }
    }
}

impl QueryRequest {
    /// Queries by a dense vector.
    pub fn by_vector(vector: Vec<f32>) -> Self {
        Self {
            vector,
            ..Default::default()
        }
    }

    /// Queries by the values of a stored vector.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Queries by a sparse vector only.
    pub fn by_sparse_vector(sparse_vector: SparseValues) -> Self {
        Self {
            sparse_vector: Some(sparse_vector),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_sparse_vector(mut self, sparse_vector: SparseValues) -> Self {
        self.sparse_vector = Some(sparse_vector);
        self
    }

    #[must_use]
    pub fn include_values(mut self, include: bool) -> Self {
        self.include_values = include;
        self
    }

    #[must_use]
    pub fn include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

/// Vector deletion.
///
/// With `delete_all` set, `ids` and `filter` are never sent. Otherwise ids
/// and filter may be combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteRequest {
    pub ids: Vec<String>,
    pub filter: Option<Value>,
    pub namespace: Option<String>,
    pub delete_all: bool,
}

impl DeleteRequest {
    /// Deletes the given ids.
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Deletes every vector matching a metadata filter.
    pub fn filter(filter: Value) -> Self {
        Self {
            filter: Some(filter),
            ..Default::default()
        }
    }

    /// Deletes every vector of the namespace.
    pub fn all() -> Self {
        Self {
            delete_all: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl Serialize for DeleteRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.delete_all {
            map.serialize_entry("deleteAll", &true)?;
        } else {
            if !self.ids.is_empty() {
                map.serialize_entry("ids", &self.ids)?;
            }
            if let Some(filter) = &self.filter {
                map.serialize_entry("filter", filter)?;
            }
        }
        if let Some(namespace) = &self.namespace {
            map.serialize_entry("namespace", namespace)?;
        }
        map.end()
    }
}

/// Partial update of one vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse_values: Option<SparseValues>,
}

impl UpdateRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_values(mut self, values: Vec<f32>) -> Self {
        self.values = values;
        self
    }

    #[must_use]
    pub fn with_set_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.set_metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_sparse_values(mut self, sparse_values: SparseValues) -> Self {
        self.sparse_values = Some(sparse_values);
        self
    }
}

/// Parameters of a vector id listing. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListVectorIdsRequest {
    pub prefix: Option<String>,
    pub limit: Option<u32>,
    pub pagination_token: Option<String>,
    pub namespace: Option<String>,
}

impl ListVectorIdsRequest {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_pagination_token(mut self, token: impl Into<String>) -> Self {
        self.pagination_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Query pairs in the fixed order prefix, limit, token, namespace.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(prefix) = &self.prefix {
            pairs.push(("prefix", Cow::Borrowed(prefix.as_str())));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", Cow::Owned(limit.to_string())));
        }
        if let Some(token) = &self.pagination_token {
            pairs.push(("paginationToken", Cow::Borrowed(token.as_str())));
        }
        if let Some(namespace) = &self.namespace {
            pairs.push(("namespace", Cow::Borrowed(namespace.as_str())));
        }
        pairs
    }
}

/// Page size and cursor of a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub pagination_token: Option<String>,
}

impl PageParams {
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_pagination_token(mut self, token: impl Into<String>) -> Self {
        self.pagination_token = Some(token.into());
        self
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(limit) = self.limit {
            pairs.push(("limit", Cow::Owned(limit.to_string())));
        }
        if let Some(token) = &self.pagination_token {
            pairs.push(("paginationToken", Cow::Borrowed(token.as_str())));
        }
        pairs
    }
}

/// What a bulk import does when a record fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImportErrorMode {
    #[default]
    Abort,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorModeBody {
    on_error: ImportErrorMode,
}

/// Bulk import from object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartImportRequest {
    /// Storage URI of the import files, such as `s3://bucket/path/`.
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_mode: Option<ErrorModeBody>,
}

impl StartImportRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            integration_id: None,
            error_mode: None,
        }
    }

    #[must_use]
    pub fn with_integration_id(mut self, integration_id: impl Into<String>) -> Self {
        self.integration_id = Some(integration_id.into());
        self
    }

    #[must_use]
    pub fn with_error_mode(mut self, on_error: ImportErrorMode) -> Self {
        self.error_mode = Some(ErrorModeBody { on_error });
        self
    }

    /// Returns the configured error mode, if any.
    pub fn error_mode(&self) -> Option<ImportErrorMode> {
        self.error_mode.map(|mode| mode.on_error)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_query_defaults() {
        let value = serde_json::to_value(QueryRequest::by_vector(vec![0.1, 0.2])).unwrap();
        assert_eq!(
            value,
            json!({
                "vector": [0.1f32, 0.2f32],
                "topK": 10,
                "includeValues": false,
                "includeMetadata": true
            })
        );
    }

    #[test]
    fn test_query_by_id_omits_vector() {
        let request = QueryRequest::by_id("v1")
            .with_top_k(3)
            .with_namespace("ns")
            .with_filter(json!({"genre": {"$eq": "drama"}}));
        let value = serde_json::to_value(request).unwrap();

        assert!(value.get("vector").is_none());
        assert_eq!(value["id"], json!("v1"));
        assert_eq!(value["topK"], json!(3));
        assert_eq!(value["namespace"], json!("ns"));
        assert_eq!(value["filter"]["genre"]["$eq"], json!("drama"));
    }

    #[test]
    fn test_delete_all_drops_ids_and_filter() {
        let request = DeleteRequest {
            ids: vec!["a".into()],
            filter: Some(json!({"x": 1})),
            namespace: Some("ns".into()),
            delete_all: true,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"deleteAll": true, "namespace": "ns"})
        );
    }

    #[test]
    fn test_delete_ids_with_filter() {
        let request = DeleteRequest::ids(["a", "b"]).with_filter(json!({"x": 1}));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"ids": ["a", "b"], "filter": {"x": 1}})
        );
    }

    #[test]
    fn test_delete_empty_ids_are_omitted() {
        let request = DeleteRequest::ids(Vec::<String>::new());
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
    }

    #[test]
    fn test_update_omits_empty_fields() {
        assert_eq!(
            serde_json::to_value(UpdateRequest::new("v1")).unwrap(),
            json!({"id": "v1"})
        );
    }

    #[test]
    fn test_update_sparse_values() {
        let sparse = SparseValues::new(vec![0, 5], vec![0.1, 0.9]).unwrap();
        let value =
            serde_json::to_value(UpdateRequest::new("v1").with_sparse_values(sparse)).unwrap();
        assert_eq!(
            value["sparseValues"],
            json!({"indices": [0, 5], "values": [0.1f32, 0.9f32]})
        );
    }

    #[test]
    fn test_list_pairs_order() {
        let request = ListVectorIdsRequest::default()
            .with_namespace("ns")
            .with_pagination_token("tok")
            .with_limit(50)
            .with_prefix("doc#");
        let keys: Vec<_> = request.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["prefix", "limit", "paginationToken", "namespace"]);
        assert!(ListVectorIdsRequest::default().to_pairs().is_empty());
    }

    #[test]
    fn test_start_import_request() {
        let request = StartImportRequest::new("s3://bucket/data/")
            .with_integration_id("int-1")
            .with_error_mode(ImportErrorMode::Continue);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "uri": "s3://bucket/data/",
                "integrationId": "int-1",
                "errorMode": {"onError": "continue"}
            })
        );
        assert_eq!(request.error_mode(), Some(ImportErrorMode::Continue));
    }
}
