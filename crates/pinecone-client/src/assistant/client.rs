//! Chat and file operations on one assistant host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::TRACING_TARGET_ASSISTANT;
use crate::error::Result;
use crate::http::{HttpClient, encode_segment, take_array};

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `user` or `assistant`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_owned(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatBody<'a> {
    messages: &'a [ChatMessage],
    #[serde(flatten)]
    options: &'a Map<String, Value>,
}

/// Client for one assistant, bound to the host its describe call reported.
///
/// Obtained from [`Pinecone::assistant`](crate::Pinecone::assistant).
#[derive(Debug, Clone)]
pub struct AssistantClient {
    name: String,
    http: HttpClient,
    description: Value,
}

impl AssistantClient {
    /// Creates a client for `name`. `description` is the decoded body of
    /// the describe call that located it.
    pub fn new(name: impl Into<String>, http: HttpClient, description: Value) -> Self {
        Self {
            name: name.into(),
            http,
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base URL of the assistant host.
    pub fn host(&self) -> &str {
        self.http.base_url()
    }

    /// Returns the description captured when the client was created.
    pub fn description(&self) -> &Value {
        &self.description
    }

    /// Sends a conversation and returns the assistant's reply.
    ///
    /// Keys of `options` (such as `model`, `filter` or `json_response`) are
    /// merged into the payload next to `messages`.
    pub async fn chat(&self, messages: &[ChatMessage], options: &Map<String, Value>) -> Result<Value> {
        tracing::debug!(
            target: TRACING_TARGET_ASSISTANT,
            assistant = %self.name,
            messages = messages.len(),
            "Sending chat"
        );

        let body = ChatBody { messages, options };
        self.http
            .post(&format!("/assistant/chat/{}", encode_segment(&self.name)), &body)
            .await
            .map_err(|e| e.with_operation("Failed to chat with assistant"))
    }

    /// Lists the files uploaded to the assistant.
    pub async fn list_files(&self) -> Result<Vec<Value>> {
        let response = self
            .http
            .get(&self.files_path())
            .await
            .map_err(|e| e.with_operation("Failed to list assistant files"))?;
        Ok(take_array(response, "files"))
    }

    pub async fn describe_file(&self, file_id: &str) -> Result<Value> {
        self.http
            .get(&format!("{}/{}", self.files_path(), encode_segment(file_id)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to describe assistant file: {file_id}.")))
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        self.http
            .delete(&format!("{}/{}", self.files_path(), encode_segment(file_id)))
            .await
            .map_err(|e| e.with_operation(&format!("Failed to delete assistant file: {file_id}.")))?;
        Ok(())
    }

    fn files_path(&self) -> String {
        format!("/assistant/files/{}", encode_segment(&self.name))
    }
}
