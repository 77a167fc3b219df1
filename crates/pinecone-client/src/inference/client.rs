//! Client for the hosted embedding and reranking models.

use serde_json::{Map, Value};

use super::request::{EmbedBody, EmbedInput, RerankRequest};
use crate::TRACING_TARGET_INFERENCE;
use crate::error::{Error, Result};
use crate::http::HttpClient;

/// Hosted embedding and reranking models.
///
/// Bound to the controller host. Obtained from
/// [`Pinecone::inference`](crate::Pinecone::inference).
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: HttpClient,
}

impl InferenceClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Embeds `inputs` with `model`.
    ///
    /// `parameters` (such as `input_type` or `truncate`) are sent only when
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty model name or no inputs.
    pub async fn embed(
        &self,
        model: &str,
        inputs: &[EmbedInput],
        parameters: &Map<String, Value>,
    ) -> Result<Value> {
        if model.is_empty() {
            return Err(Error::validation("Model name is required for embedding."));
        }
        if inputs.is_empty() {
            return Err(Error::validation(
                "At least one input is required for embedding.",
            ));
        }

        tracing::debug!(
            target: TRACING_TARGET_INFERENCE,
            model,
            inputs = inputs.len(),
            "Generating embeddings"
        );

        let body = EmbedBody {
            model,
            inputs,
            parameters,
        };
        self.http
            .post("/embed", &body)
            .await
            .map_err(|e| e.with_operation("Failed to generate embeddings"))
    }

    /// Ranks documents by relevance to a query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty model, query or document
    /// list.
    pub async fn rerank(&self, request: &RerankRequest) -> Result<Value> {
        if request.model.is_empty() {
            return Err(Error::validation("Model name is required for reranking."));
        }
        if request.query.is_empty() {
            return Err(Error::validation("Query is required for reranking."));
        }
        if request.documents.is_empty() {
            return Err(Error::validation(
                "At least one document is required for reranking.",
            ));
        }

        tracing::debug!(
            target: TRACING_TARGET_INFERENCE,
            model = %request.model,
            documents = request.documents.len(),
            "Reranking documents"
        );

        self.http
            .post("/rerank", request)
            .await
            .map_err(|e| e.with_operation("Failed to rerank documents"))
    }

    /// Lists the hosted models.
    pub async fn list_models(&self) -> Result<Value> {
        self.http
            .get("/models")
            .await
            .map_err(|e| e.with_operation("Failed to list models"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ClientOptions, PineconeConfig};

    fn unreachable_client() -> InferenceClient {
        let config = PineconeConfig::new("key", ClientOptions::default()).unwrap();
        InferenceClient::new(HttpClient::from_config(&config, "http://127.0.0.1:9").unwrap())
    }

    #[tokio::test]
    async fn test_embed_validation() {
        let client = unreachable_client();
        let params = Map::new();

        let error = client
            .embed("", &[EmbedInput::from("a")], &params)
            .await
            .unwrap_err();
        assert_eq!(error.message(), "Model name is required for embedding.");

        let error = client.embed("m", &[], &params).await.unwrap_err();
        assert!(error.is_validation());
    }

    #[tokio::test]
    async fn test_rerank_validation() {
        let client = unreachable_client();

        let request = RerankRequest::new("m", "", vec![json!("a")]);
        let error = client.rerank(&request).await.unwrap_err();
        assert_eq!(error.message(), "Query is required for reranking.");

        let request = RerankRequest::new("m", "q", Vec::new());
        let error = client.rerank(&request).await.unwrap_err();
        assert_eq!(
            error.message(),
            "At least one document is required for reranking."
        );
    }
}
