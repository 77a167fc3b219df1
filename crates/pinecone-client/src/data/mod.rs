//! Data plane: vector operations against an index host.
//!
//! [`DataPlane`] is the stateless facade, [`Index`] adds index-level
//! operations (stats, imports, namespaces) on top of it, and
//! [`IndexNamespace`] fixes the namespace of every call.

mod index;
mod namespace;
mod plane;
mod request;

pub use index::Index;
pub use namespace::IndexNamespace;
pub use plane::DataPlane;
pub use request::{
    DEFAULT_TOP_K, DeleteRequest, ImportErrorMode, ListVectorIdsRequest, PageParams,
    QueryRequest, StartImportRequest, UpdateRequest,
};
