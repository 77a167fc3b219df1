//! Control plane: index, collection, backup, restore and assistant
//! management against the controller host.

mod plane;
mod request;

pub use plane::ControlPlane;
pub use request::{
    ConfigureIndexRequest, CreateAssistantRequest, CreateBackupRequest, CreateCollectionRequest,
    CreateForModelRequest, CreateIndexRequest, UpdateAssistantRequest,
};
