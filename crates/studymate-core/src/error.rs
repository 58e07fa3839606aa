//! Typed errors shared across the workspace.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or extracting text from a document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported document format: {detected}")]
    UnsupportedFormat { detected: String },

    #[error("document could not be read: {reason}")]
    Unreadable { reason: String },

    #[error("document contains no extractable text")]
    EmptyDocument,

    #[error("document handles are not supported by this loader: {0}")]
    HandleUnsupported(String),
}

/// Failures while talking to the reasoning engine. Any of these aborts the
/// current agent run; engine errors are never folded into tool outcomes.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Request(String),

    #[error("engine API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed engine response: {0}")]
    MalformedResponse(String),

    #[error("engine returned no choices")]
    EmptyReply,

    #[error("no engine configured for model '{0}': missing API key")]
    NotConfigured(String),
}

/// Failures inside a tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Failures that abort a whole agent run.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Engine(#[from] EngineError),
}
