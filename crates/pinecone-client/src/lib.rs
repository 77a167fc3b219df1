#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for configuration resolution.
pub const TRACING_TARGET_CONFIG: &str = "pinecone_client::config";

/// Tracing target for individual HTTP requests and transport failures.
pub const TRACING_TARGET_HTTP: &str = "pinecone_client::http";

/// Tracing target for control-plane operations and client creation.
pub const TRACING_TARGET_CONTROL: &str = "pinecone_client::control";

/// Tracing target for data-plane operations and index host discovery.
pub const TRACING_TARGET_DATA: &str = "pinecone_client::data";

/// Tracing target for embedding and reranking.
pub const TRACING_TARGET_INFERENCE: &str = "pinecone_client::inference";

/// Tracing target for assistant operations.
pub const TRACING_TARGET_ASSISTANT: &str = "pinecone_client::assistant";

pub mod assistant;
mod client;
pub mod config;
pub mod control;
pub mod data;
mod error;
pub mod http;
pub mod inference;
pub mod models;
#[doc(hidden)]
pub mod prelude;

pub use assistant::{AssistantClient, ChatMessage};
pub use client::Pinecone;
pub use config::{ClientOptions, Environment, PineconeConfig, ProcessEnvironment};
pub use control::{
    ConfigureIndexRequest, ControlPlane, CreateAssistantRequest, CreateBackupRequest,
    CreateCollectionRequest, CreateForModelRequest, CreateIndexRequest, UpdateAssistantRequest,
};
pub use data::{
    DataPlane, DeleteRequest, ImportErrorMode, Index, IndexNamespace, ListVectorIdsRequest,
    PageParams, QueryRequest, StartImportRequest, UpdateRequest,
};
pub use error::{BoxedError, DEFAULT_ERROR_MESSAGE, Error, ErrorKind, Result};
pub use http::{HttpClient, classify};
pub use inference::{EmbedInput, InferenceClient, RerankRequest};
