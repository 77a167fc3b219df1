//! Request bodies of the control plane.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{Cloud, DeletionProtection, IndexEmbed, IndexSpec, Metric, VectorType};

/// Parameters of an index creation. The name is passed separately.
///
/// `metric` falls back to cosine when unset; every other field is sent
/// only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateIndexRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    pub spec: IndexSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_type: Option<VectorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_protection: Option<DeletionProtection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity: Option<Value>,
}

impl CreateIndexRequest {
    /// Creates a request for an index deployed as `spec`.
    pub fn new(spec: IndexSpec) -> Self {
        Self {
            spec,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_dimension(mut self, dimension: u32) -> Self {
        self.dimension = Some(dimension);
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    #[must_use]
    pub fn with_vector_type(mut self, vector_type: VectorType) -> Self {
        self.vector_type = Some(vector_type);
        self
    }

    #[must_use]
    pub fn with_deletion_protection(mut self, deletion_protection: DeletionProtection) -> Self {
        self.deletion_protection = Some(deletion_protection);
        self
    }

    /// Adds one tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn with_read_capacity(mut self, read_capacity: Value) -> Self {
        self.read_capacity = Some(read_capacity);
        self
    }
}

/// Parameters of an index with integrated embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateForModelRequest {
    pub cloud: Cloud,
    pub region: String,
    pub embed: IndexEmbed,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_protection: Option<DeletionProtection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity: Option<Value>,
}

impl CreateForModelRequest {
    pub fn new(cloud: Cloud, region: impl Into<String>, embed: IndexEmbed) -> Self {
        Self {
            cloud,
            region: region.into(),
            embed,
            deletion_protection: None,
            tags: None,
            schema: None,
            read_capacity: None,
        }
    }

    #[must_use]
    pub fn with_deletion_protection(mut self, deletion_protection: DeletionProtection) -> Self {
        self.deletion_protection = Some(deletion_protection);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn with_read_capacity(mut self, read_capacity: Value) -> Self {
        self.read_capacity = Some(read_capacity);
        self
    }
}

/// Fields to change on an existing index. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigureIndexRequest {
    /// Deployment changes such as `{"pod": {"replicas": 2}}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_protection: Option<DeletionProtection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity: Option<Value>,
}

impl ConfigureIndexRequest {
    #[must_use]
    pub fn with_spec(mut self, spec: Value) -> Self {
        self.spec = Some(spec);
        self
    }

    #[must_use]
    pub fn with_deletion_protection(mut self, deletion_protection: DeletionProtection) -> Self {
        self.deletion_protection = Some(deletion_protection);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_embed(mut self, embed: Value) -> Self {
        self.embed = Some(embed);
        self
    }

    #[must_use]
    pub fn with_read_capacity(mut self, read_capacity: Value) -> Self {
        self.read_capacity = Some(read_capacity);
        self
    }
}

/// Snapshot of a pod index into a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCollectionRequest {
    pub name: String,
    /// Name of the index to snapshot.
    pub source: String,
}

impl CreateCollectionRequest {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Backup of a serverless index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBackupRequest {
    pub source_index_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateBackupRequest {
    pub fn new(source_index_name: impl Into<String>) -> Self {
        Self {
            source_index_name: source_index_name.into(),
            name: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// New assistant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAssistantRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl CreateAssistantRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: None,
            metadata: None,
            region: None,
        }
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Changes to an existing assistant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateAssistantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl UpdateAssistantRequest {
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
