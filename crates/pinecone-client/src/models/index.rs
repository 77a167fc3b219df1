//! Index descriptions as returned by the control plane.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Similarity metric of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Cosine similarity.
    #[default]
    Cosine,
    /// Euclidean distance.
    Euclidean,
    /// Dot product.
    Dotproduct,
}

/// Kind of vectors an index stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VectorType {
    #[default]
    Dense,
    Sparse,
}

/// Whether an index can be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeletionProtection {
    Enabled,
    #[default]
    Disabled,
}

/// Cloud provider hosting a serverless index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Cloud {
    Aws,
    Gcp,
    Azure,
}

/// Serverless deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerlessSpec {
    pub cloud: Cloud,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_collection: Option<String>,
}

/// Pod-based deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodSpec {
    pub environment: String,
    pub pod_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_config: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_collection: Option<String>,
}

/// Bring-your-own-cloud deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByocSpec {
    pub environment: String,
}

/// Deployment of an index. Exactly one member is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serverless: Option<ServerlessSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<PodSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byoc: Option<ByocSpec>,
}

impl IndexSpec {
    /// Serverless deployment in `cloud`/`region`.
    pub fn serverless(cloud: Cloud, region: impl Into<String>) -> Self {
        Self {
            serverless: Some(ServerlessSpec {
                cloud,
                region: region.into(),
                source_collection: None,
            }),
            ..Default::default()
        }
    }

    /// Pod deployment in `environment` with the given pod type.
    pub fn pod(environment: impl Into<String>, pod_type: impl Into<String>) -> Self {
        Self {
            pod: Some(PodSpec {
                environment: environment.into(),
                pod_type: pod_type.into(),
                pods: None,
                replicas: None,
                shards: None,
                metadata_config: None,
                source_collection: None,
            }),
            ..Default::default()
        }
    }

    /// BYOC deployment in `environment`.
    pub fn byoc(environment: impl Into<String>) -> Self {
        Self {
            byoc: Some(ByocSpec {
                environment: environment.into(),
            }),
            ..Default::default()
        }
    }
}

/// Readiness of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub ready: bool,
    /// Lifecycle state such as `Initializing` or `Ready`.
    #[serde(default)]
    pub state: String,
}

/// Integrated embedding configuration of an index created for a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexEmbed {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_type: Option<VectorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_map: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_parameters: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_parameters: Option<Map<String, Value>>,
}

/// Description of an index.
///
/// Every field may be absent. Responses to a create call may omit the host
/// and status until the index is provisioned, and a configure call may
/// answer with an empty body, which decodes to the default model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexModel {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u32>,
    #[serde(default)]
    pub metric: Metric,
    /// Data-plane host, without scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<IndexSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IndexStatus>,
    #[serde(default)]
    pub vector_type: VectorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_protection: Option<DeletionProtection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<IndexEmbed>,
}

impl IndexModel {
    /// Returns the data-plane host if the service reported a non-blank one.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().map(str::trim).filter(|h| !h.is_empty())
    }

    /// Returns true once the index accepts data-plane traffic.
    pub fn is_ready(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.ready)
    }
}

/// Per-namespace statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    #[serde(default)]
    pub vector_count: u64,
}

/// Statistics returned by `describe_index_stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u32>,
    #[serde(default)]
    pub index_fullness: f32,
    #[serde(default)]
    pub total_vector_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_type: Option<VectorType>,
}
