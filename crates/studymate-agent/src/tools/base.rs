//! Tool trait — the abstract interface every agent tool implements.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use studymate_core::error::ToolError;
use studymate_core::types::ToolDescriptor;

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// Every agent tool implements this trait.
///
/// The agent loop advertises tools to the engine via `to_descriptor()` and
/// dispatches calls via `execute()`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the engine uses to call this tool (e.g. `"summarize_text"`).
    fn name(&self) -> &str;

    /// Human-readable description shown to the engine.
    fn description(&self) -> &str;

    /// JSON Schema describing the parameters (as a `serde_json::Value`).
    ///
    /// Must be `{"type": "object", "properties": {...}, "required": [...]}`.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    ///
    /// Returns the structured payload the engine reads. Failures come back
    /// as a typed `ToolError` — the registry folds them into an error
    /// outcome for the engine.
    async fn execute(&self, params: HashMap<String, Value>) -> Result<Value, ToolError>;

    /// Build the `ToolDescriptor` sent to the engine.
    ///
    /// Default implementation — rarely needs overriding.
    fn to_descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.name(), self.description(), self.parameters())
    }
}

// ─────────────────────────────────────────────
// Param helpers
// ─────────────────────────────────────────────

/// Extract a required `String` param.
pub fn require_string(params: &HashMap<String, Value>, key: &str) -> Result<String, ToolError> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ToolError::MissingArgument(key.to_string()))
}

/// Extract an optional `String` param.
pub fn optional_string(params: &HashMap<String, Value>, key: &str) -> Option<String> {
    params.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}
