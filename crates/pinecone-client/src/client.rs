//! Top-level client.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::assistant::AssistantClient;
use crate::config::{ClientOptions, PineconeConfig, ProcessEnvironment};
use crate::control::{
    ConfigureIndexRequest, ControlPlane, CreateAssistantRequest, CreateBackupRequest,
    CreateCollectionRequest, CreateForModelRequest, CreateIndexRequest, UpdateAssistantRequest,
};
use crate::data::{Index, PageParams};
use crate::error::{Error, Result};
use crate::http::{HttpClient, host_url};
use crate::inference::InferenceClient;
use crate::models::IndexModel;
use crate::{TRACING_TARGET_ASSISTANT, TRACING_TARGET_CONTROL, TRACING_TARGET_DATA};

/// Inner client state shared by every clone.
struct PineconeInner {
    config: PineconeConfig,
    transport: reqwest::Client,
    control: ControlPlane,
    indexes: RwLock<HashMap<String, Index>>,
    assistants: RwLock<HashMap<String, AssistantClient>>,
    inference: OnceLock<InferenceClient>,
}

/// Entry point of the library.
///
/// Owns the configuration and the control-plane facade, and hands out
/// [`Index`] and [`AssistantClient`] handles whose hosts are discovered
/// with a describe call. Discovered handles are cached by name for the
/// lifetime of the client; [`forget_index`](Self::forget_index) and
/// [`forget_assistant`](Self::forget_assistant) drop an entry so the next
/// lookup describes again.
///
/// Cloning is cheap and clones share the cache and the connection pool.
///
/// ```rust,no_run
/// use pinecone_client::{Pinecone, QueryRequest};
///
/// # async fn run() -> pinecone_client::Result<()> {
/// let pinecone = Pinecone::from_env()?;
/// let index = pinecone.index("docs").await?;
/// let response = index
///     .query(&QueryRequest::by_vector(vec![0.1, 0.2]).with_top_k(5))
///     .await?;
/// println!("{} matches", response.matches.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Pinecone {
    inner: Arc<PineconeInner>,
}

impl std::fmt::Debug for Pinecone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pinecone")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Pinecone {
    /// Creates a client with an explicit API key and default options.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(PineconeConfig::new(api_key, ClientOptions::default())?)
    }

    /// Creates a client reading the API key from `PINECONE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(PineconeConfig::from_env(ClientOptions::default())?)
    }

    /// Creates a client from an optional explicit key and options. Without
    /// a key, `PINECONE_API_KEY` is used.
    pub fn with_options(api_key: Option<String>, options: ClientOptions) -> Result<Self> {
        Self::from_config(PineconeConfig::resolve(api_key, options, ProcessEnvironment)?)
    }

    /// Creates a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: PineconeConfig) -> Result<Self> {
        let transport = HttpClient::build_transport(&config)?;
        let control = ControlPlane::new(HttpClient::new(
            transport.clone(),
            config.controller_host(),
        ));

        tracing::info!(
            target: TRACING_TARGET_CONTROL,
            controller_host = %config.controller_host(),
            "Pinecone client created"
        );

        let inner = PineconeInner {
            config,
            transport,
            control,
            indexes: RwLock::new(HashMap::new()),
            assistants: RwLock::new(HashMap::new()),
            inference: OnceLock::new(),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &PineconeConfig {
        &self.inner.config
    }

    /// Returns the control-plane facade.
    pub fn control_plane(&self) -> &ControlPlane {
        &self.inner.control
    }

    /// Returns a handle on an index, describing it on first use.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a blank name, before any request.
    /// - [`Error::Decode`] if the description carries no host.
    /// - Any error of the describe call.
    pub async fn index(&self, name: &str) -> Result<Index> {
        require_name(name, "Index")?;

        if let Some(index) = self.inner.indexes.read().await.get(name) {
            return Ok(index.clone());
        }

        let description = self.inner.control.describe_index_raw(name).await?;
        let host = discovered_host(&description)
            .ok_or_else(|| Error::decode(format!("Index '{name}' does not have a host URL.")))?;

        tracing::debug!(
            target: TRACING_TARGET_DATA,
            index = %name,
            host = %host,
            "Resolved index host"
        );

        let index = Index::new(name, self.resource(host));
        let mut cache = self.inner.indexes.write().await;
        Ok(cache.entry(name.to_owned()).or_insert(index).clone())
    }

    /// Returns a client for an assistant, describing it on first use.
    ///
    /// Same caching and errors as [`index`](Self::index).
    pub async fn assistant(&self, name: &str) -> Result<AssistantClient> {
        require_name(name, "Assistant")?;

        if let Some(assistant) = self.inner.assistants.read().await.get(name) {
            return Ok(assistant.clone());
        }

        let description = self.inner.control.describe_assistant(name).await?;
        let host = discovered_host(&description).ok_or_else(|| {
            Error::decode(format!("Assistant '{name}' does not have a host URL."))
        })?;

        tracing::debug!(
            target: TRACING_TARGET_ASSISTANT,
            assistant = %name,
            host = %host,
            "Resolved assistant host"
        );

        let assistant = AssistantClient::new(name, self.resource(host), description);
        let mut cache = self.inner.assistants.write().await;
        Ok(cache.entry(name.to_owned()).or_insert(assistant).clone())
    }

    /// Returns the inference client, created on first use.
    pub fn inference(&self) -> &InferenceClient {
        self.inner
            .inference
            .get_or_init(|| InferenceClient::new(self.resource(self.inner.config.controller_host())))
    }

    /// Drops a cached index handle. Returns true if one was cached.
    pub async fn forget_index(&self, name: &str) -> bool {
        self.inner.indexes.write().await.remove(name).is_some()
    }

    /// Drops a cached assistant client. Returns true if one was cached.
    pub async fn forget_assistant(&self, name: &str) -> bool {
        self.inner.assistants.write().await.remove(name).is_some()
    }

    /// Returns true if the index can be described. Any error yields false.
    pub async fn has_index(&self, name: &str) -> bool {
        self.inner.control.describe_index_raw(name).await.is_ok()
    }

    fn resource(&self, host: impl AsRef<str>) -> HttpClient {
        HttpClient::new(self.inner.transport.clone(), host_url(host.as_ref()))
    }

    /// Lists every index in the project.
    pub async fn list_indexes(&self) -> Result<Vec<IndexModel>> {
        self.inner.control.list_indexes().await
    }

    /// Creates an index. The metric defaults to cosine.
    pub async fn create_index(&self, name: &str, request: CreateIndexRequest) -> Result<IndexModel> {
        self.inner.control.create_index(name, request).await
    }

    /// Creates an index with integrated embedding for a hosted model.
    pub async fn create_for_model(
        &self,
        name: &str,
        request: &CreateForModelRequest,
    ) -> Result<IndexModel> {
        self.inner.control.create_for_model(name, request).await
    }

    /// Describes one index.
    pub async fn describe_index(&self, name: &str) -> Result<IndexModel> {
        self.inner.control.describe_index(name).await
    }

    /// Deletes an index and drops its cached handle.
    pub async fn delete_index(&self, name: &str) -> Result<()> {
        self.inner.control.delete_index(name).await?;
        self.forget_index(name).await;
        Ok(())
    }

    /// Changes the configuration of an index.
    pub async fn configure_index(
        &self,
        name: &str,
        request: &ConfigureIndexRequest,
    ) -> Result<IndexModel> {
        self.inner.control.configure_index(name, request).await
    }

    /// Creates a collection from a pod index.
    pub async fn create_collection(&self, request: &CreateCollectionRequest) -> Result<Value> {
        self.inner.control.create_collection(request).await
    }

    /// Lists every collection in the project.
    pub async fn list_collections(&self) -> Result<Vec<Value>> {
        self.inner.control.list_collections().await
    }

    /// Describes one collection.
    pub async fn describe_collection(&self, name: &str) -> Result<Value> {
        self.inner.control.describe_collection(name).await
    }

    /// Deletes a collection.
    pub async fn delete_collection(&self, name: &str) -> Result<()> {
        self.inner.control.delete_collection(name).await
    }

    /// Creates a backup of a serverless index.
    pub async fn create_backup(&self, request: &CreateBackupRequest) -> Result<Value> {
        self.inner.control.create_backup(request).await
    }

    /// Lists every backup in the project.
    pub async fn list_backups(&self) -> Result<Vec<Value>> {
        self.inner.control.list_backups().await
    }

    /// Describes one backup.
    pub async fn describe_backup(&self, id: &str) -> Result<Value> {
        self.inner.control.describe_backup(id).await
    }

    /// Deletes a backup.
    pub async fn delete_backup(&self, id: &str) -> Result<()> {
        self.inner.control.delete_backup(id).await
    }

    /// Lists restore jobs, one page at a time.
    pub async fn list_restore_jobs(&self, params: &PageParams) -> Result<Vec<Value>> {
        self.inner.control.list_restore_jobs(params).await
    }

    /// Describes one restore job.
    pub async fn describe_restore_job(&self, id: &str) -> Result<Value> {
        self.inner.control.describe_restore_job(id).await
    }

    /// Creates an assistant.
    pub async fn create_assistant(&self, request: &CreateAssistantRequest) -> Result<Value> {
        self.inner.control.create_assistant(request).await
    }

    /// Lists every assistant in the project.
    pub async fn list_assistants(&self) -> Result<Vec<Value>> {
        self.inner.control.list_assistants().await
    }

    /// Describes one assistant.
    pub async fn describe_assistant(&self, name: &str) -> Result<Value> {
        self.inner.control.describe_assistant(name).await
    }

    /// Changes the instructions or metadata of an assistant.
    pub async fn update_assistant(
        &self,
        name: &str,
        request: &UpdateAssistantRequest,
    ) -> Result<Value> {
        self.inner.control.update_assistant(name, request).await
    }

    /// Deletes an assistant and drops its cached client.
    pub async fn delete_assistant(&self, name: &str) -> Result<()> {
        self.inner.control.delete_assistant(name).await?;
        self.forget_assistant(name).await;
        Ok(())
    }
}

fn require_name(name: &str, kind: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation(format!("{kind} name must not be empty.")));
    }
    Ok(())
}

/// Reads a non-blank `host` string from a describe response.
fn discovered_host(description: &Value) -> Option<&str> {
    description
        .get("host")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|host| !host.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_discovered_host() {
        assert_eq!(
            discovered_host(&json!({"host": "docs-abc.svc.pinecone.io"})),
            Some("docs-abc.svc.pinecone.io")
        );
        assert_eq!(discovered_host(&json!({"host": ""})), None);
        assert_eq!(discovered_host(&json!({"host": "   "})), None);
        assert_eq!(discovered_host(&json!({"host": null})), None);
        assert_eq!(discovered_host(&json!({"host": 42})), None);
        assert_eq!(discovered_host(&json!({})), None);
    }

    #[tokio::test]
    async fn test_blank_names_are_rejected_locally() {
        let options = ClientOptions::default().with_controller_host("http://127.0.0.1:9");
        let pinecone = Pinecone::with_options(Some("key".into()), options).unwrap();

        for name in ["", "   "] {
            let error = pinecone.index(name).await.unwrap_err();
            assert!(error.is_validation());
            assert_eq!(error.message(), "Index name must not be empty.");

            let error = pinecone.assistant(name).await.unwrap_err();
            assert_eq!(error.message(), "Assistant name must not be empty.");
        }
    }

    #[tokio::test]
    async fn test_has_index_is_false_on_transport_error() {
        let options = ClientOptions::default().with_controller_host("http://127.0.0.1:9");
        let pinecone = Pinecone::with_options(Some("key".into()), options).unwrap();
        assert!(!pinecone.has_index("docs").await);
    }

    #[test]
    fn test_inference_is_created_once() {
        let pinecone = Pinecone::new("key").unwrap();
        let first = pinecone.inference() as *const InferenceClient;
        let second = pinecone.inference() as *const InferenceClient;
        assert_eq!(first, second);
    }
}
