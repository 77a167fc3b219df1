//! Request bodies of the inference API.

use serde::Serialize;
use serde_json::{Map, Value};

/// One input of an embedding call.
///
/// Plain strings are sent as `{"text": ...}`; structured inputs are sent
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EmbedInput {
    Text { text: String },
    Fields(Map<String, Value>),
}

impl From<&str> for EmbedInput {
    fn from(text: &str) -> Self {
        Self::Text {
            text: text.to_owned(),
        }
    }
}

impl From<String> for EmbedInput {
    fn from(text: String) -> Self {
        Self::Text { text }
    }
}

impl From<Map<String, Value>> for EmbedInput {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Fields(fields)
    }
}

#[derive(Serialize)]
pub(crate) struct EmbedBody<'a> {
    pub model: &'a str,
    pub inputs: &'a [EmbedInput],
    #[serde(skip_serializing_if = "no_parameters")]
    pub parameters: &'a Map<String, Value>,
}

fn no_parameters(parameters: &&Map<String, Value>) -> bool {
    parameters.is_empty()
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Reranking of documents against a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RerankRequest {
    pub model: String,
    pub query: String,
    /// Documents to rank: strings or objects.
    pub documents: Vec<Value>,
    /// Number of results to return. Zero leaves it to the service.
    #[serde(skip_serializing_if = "is_zero")]
    pub top_n: u32,
    pub return_documents: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rank_fields: Vec<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl RerankRequest {
    pub fn new(model: impl Into<String>, query: impl Into<String>, documents: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            query: query.into(),
            documents,
            top_n: 0,
            return_documents: true,
            rank_fields: Vec::new(),
            parameters: Map::new(),
        }
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: u32) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn with_return_documents(mut self, return_documents: bool) -> Self {
        self.return_documents = return_documents;
        self
    }

    #[must_use]
    pub fn with_rank_field(mut self, field: impl Into<String>) -> Self {
        self.rank_fields.push(field.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}
