//! Assistant API: chat and file management for one assistant.

mod client;

pub use client::{AssistantClient, ChatMessage};
