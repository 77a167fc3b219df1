//! Vector records and query results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Sparse embedding: parallel `indices` and `values` of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseValues {
    /// Dimension indices of the non-zero entries.
    pub indices: Vec<u32>,
    /// Values of the non-zero entries.
    pub values: Vec<f32>,
}

impl SparseValues {
    /// Creates a sparse vector, rejecting mismatched lengths.
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::validation(format!(
                "Sparse vector indices and values must have equal length (got {} and {}).",
                indices.len(),
                values.len()
            )));
        }
        Ok(Self { indices, values })
    }

    /// Returns the number of non-zero entries.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A vector record as stored in an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vector {
    /// Identifier, unique within a namespace.
    pub id: String,
    /// Dense values. Empty for sparse-only records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,
    /// Sparse values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse_values: Option<SparseValues>,
    /// Metadata attached to the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Vector {
    /// Creates a dense vector record.
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
            ..Default::default()
        }
    }

    /// Creates a sparse-only vector record.
    pub fn sparse(id: impl Into<String>, sparse_values: SparseValues) -> Self {
        Self {
            id: id.into(),
            sparse_values: Some(sparse_values),
            ..Default::default()
        }
    }

    /// Attaches sparse values.
    #[must_use]
    pub fn with_sparse_values(mut self, sparse_values: SparseValues) -> Self {
        self.sparse_values = Some(sparse_values);
        self
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Adds a single metadata field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// One match returned by a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMatch {
    /// Matched vector id.
    pub id: String,
    /// Similarity score.
    #[serde(default)]
    pub score: f32,
    /// Dense values, when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,
    /// Sparse values, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse_values: Option<SparseValues>,
    /// Metadata, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Result of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Matches ordered by score.
    #[serde(default)]
    pub matches: Vec<QueryMatch>,
    /// Namespace the query ran in.
    #[serde(default)]
    pub namespace: String,
    /// Read units consumed, as reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
}

/// Result of a fetch, keyed by vector id.
///
/// Ids that do not exist are absent from `vectors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub vectors: BTreeMap<String, Vector>,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
}

/// Identifier entry of a vector listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorId {
    /// Vector id.
    pub id: String,
}

/// Pagination cursor of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Token for the next page.
    pub next: String,
}

/// One page of vector ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorIdPage {
    /// Ids on this page.
    #[serde(default)]
    pub vectors: Vec<VectorId>,
    /// Cursor for the next page, absent on the last one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Namespace the ids belong to.
    #[serde(default)]
    pub namespace: String,
}

impl VectorIdPage {
    /// Returns the token for the next page, if any.
    pub fn next_token(&self) -> Option<&str> {
        self.pagination.as_ref().map(|p| p.next.as_str())
    }
}
