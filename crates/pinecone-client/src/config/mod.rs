//! Client configuration.
//!
//! [`ClientOptions`] is the caller-facing option bag; [`PineconeConfig`] is
//! the validated, immutable bundle every facade is built from. Environment
//! lookups go through the [`Environment`] capability so resolution stays
//! testable without touching the process environment.

mod environment;
mod options;
mod resolved;

pub use environment::{Environment, ProcessEnvironment};
pub use options::ClientOptions;
pub use resolved::PineconeConfig;

/// Default values for configuration options.
pub mod defaults {
    /// Environment variable consulted when no API key is passed explicitly.
    pub const API_KEY_ENV: &str = "PINECONE_API_KEY";

    /// Public control-plane origin.
    pub const CONTROLLER_HOST: &str = "https://api.pinecone.io";

    /// Default request timeout in seconds.
    pub const TIMEOUT_SECS: u64 = 30;

    /// API version sent with every request.
    pub const API_VERSION: &str = "2025-10";

    /// Header carrying the API key.
    pub const API_KEY_HEADER: &str = "Api-Key";

    /// Header carrying the API version.
    pub const API_VERSION_HEADER: &str = "X-Pinecone-Api-Version";
}
