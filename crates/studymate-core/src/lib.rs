//! Studymate core — conversation model, tool types, errors, config.
//!
//! This crate contains:
//! - **conversation**: the append-only `Conversation` of role-attributed `Turn`s
//! - **types**: tool calls/outcomes/descriptors and the engine wire format
//! - **error**: the typed error taxonomy shared across the workspace
//! - **config**: JSON config schema + loader with env-var overrides

pub mod config;
pub mod conversation;
pub mod error;
pub mod types;
pub mod utils;

pub use conversation::{Conversation, Part, Role, Turn};
pub use error::{AgentError, EngineError, ExtractionError, ToolError};
pub use types::{EngineReply, ToolCall, ToolDescriptor, ToolOutcome, ToolResult};
