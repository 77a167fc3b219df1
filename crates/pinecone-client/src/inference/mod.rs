//! Inference API: embeddings, reranking and the model catalog.

mod client;
mod request;

pub use client::InferenceClient;
pub use request::{EmbedInput, RerankRequest};
