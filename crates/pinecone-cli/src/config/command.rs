//! Subcommand definitions.

use std::path::PathBuf;

use clap::Subcommand;
use pinecone_client::models::{Cloud, Metric};

/// Top-level subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage indexes on the control plane
    Indexes {
        #[command(subcommand)]
        command: IndexCommand,
    },

    /// Show vector counts of an index
    Stats {
        /// Index name
        index: String,
        /// Metadata filter as a JSON object
        #[arg(long)]
        filter: Option<String>,
    },

    /// Query an index by vector or by stored id
    Query {
        /// Index name
        index: String,
        /// Query vector as comma-separated floats
        #[arg(long, value_delimiter = ',', conflicts_with = "id", required_unless_present = "id")]
        vector: Vec<f32>,
        /// Id of a stored vector to query with
        #[arg(long)]
        id: Option<String>,
        /// Number of matches to return
        #[arg(long, default_value_t = pinecone_client::data::DEFAULT_TOP_K)]
        top_k: u32,
        /// Namespace to query
        #[arg(long, short)]
        namespace: Option<String>,
        /// Metadata filter as a JSON object
        #[arg(long)]
        filter: Option<String>,
        /// Return vector values with each match
        #[arg(long)]
        include_values: bool,
    },

    /// Fetch vectors by id
    Fetch {
        /// Index name
        index: String,
        /// Vector ids
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long, short)]
        namespace: Option<String>,
    },

    /// Upsert vectors read from a JSON array file
    Upsert {
        /// Index name
        index: String,
        /// Path to a JSON array of `{"id", "values", "metadata"}` objects
        #[arg(long)]
        file: PathBuf,
        #[arg(long, short)]
        namespace: Option<String>,
    },

    /// List vector ids, one page at a time
    ListIds {
        /// Index name
        index: String,
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        /// Token from a previous page
        #[arg(long)]
        pagination_token: Option<String>,
        #[arg(long, short)]
        namespace: Option<String>,
    },

    /// List the namespaces of an index
    Namespaces {
        /// Index name
        index: String,
    },

    /// Embed text inputs with a hosted model
    Embed {
        /// Model name, e.g. multilingual-e5-large
        #[arg(long)]
        model: String,
        /// Value for the `input_type` parameter
        #[arg(long)]
        input_type: Option<String>,
        /// Texts to embed
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

/// `indexes` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum IndexCommand {
    /// List all indexes
    List,

    /// Describe an index
    Describe { name: String },

    /// Delete an index
    Delete { name: String },

    /// Create a serverless index
    Create {
        name: String,
        #[arg(long)]
        dimension: u32,
        /// cosine, euclidean or dotproduct
        #[arg(long, default_value_t = Metric::Cosine)]
        metric: Metric,
        /// aws, gcp or azure
        #[arg(long, default_value_t = Cloud::Aws)]
        cloud: Cloud,
        #[arg(long, default_value = "us-east-1")]
        region: String,
    },
}
