//! Typed views of the service's JSON payloads.
//!
//! Facades return these where the shape is stable. Everything else is
//! handed back as a decoded [`serde_json::Value`], which [`from_value`]
//! converts into any caller-defined type.

mod index;
mod vector;

pub use index::{
    ByocSpec, Cloud, DeletionProtection, IndexEmbed, IndexModel, IndexSpec, IndexStats,
    IndexStatus, Metric, NamespaceSummary, PodSpec, ServerlessSpec, VectorType,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
pub use vector::{
    FetchResponse, Pagination, QueryMatch, QueryResponse, SparseValues, Vector, VectorId,
    VectorIdPage,
};

use crate::error::Result;

/// Converts a decoded response body into `T`.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) if the value does not
/// match the shape of `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}
