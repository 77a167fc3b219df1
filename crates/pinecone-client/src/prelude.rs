//! Convenience re-exports for common types.
//!
//! `use pinecone_client::prelude::*;` brings in the client, the request
//! builders and the models needed for typical index work.

pub use crate::client::Pinecone;
pub use crate::config::ClientOptions;
pub use crate::control::{ConfigureIndexRequest, CreateForModelRequest, CreateIndexRequest};
pub use crate::data::{
    DeleteRequest, Index, IndexNamespace, ListVectorIdsRequest, QueryRequest, UpdateRequest,
};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::models::{
    Cloud, DeletionProtection, IndexModel, IndexSpec, Metric, QueryResponse, SparseValues, Vector,
    VectorType,
};
