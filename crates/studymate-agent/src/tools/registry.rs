//! Tool registry — stores tools by name and dispatches engine calls.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use studymate_core::types::{ToolDescriptor, ToolOutcome};

use super::base::Tool;

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Stores tools keyed by name and dispatches calls.
///
/// Owns `Arc<dyn Tool>` so tools can be shared across threads.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Overwrites any previous tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        info!(tool = tool.name(), "registered tool");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Check if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Names of all registered tools, sorted for determinism.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the engine-facing descriptors for all registered tools.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> =
            self.tools.values().map(|t| t.to_descriptor()).collect();
        descriptors.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        descriptors
    }

    /// Dispatch a tool call by name.
    ///
    /// The engine always gets a `ToolOutcome` back: unknown tools and tool
    /// failures become error outcomes, never aborted runs.
    pub async fn dispatch(&self, name: &str, params: HashMap<String, Value>) -> ToolOutcome {
        let tool = match self.tools.get(name) {
            Some(t) => t,
            None => {
                warn!(tool = name, "unknown tool requested");
                return ToolOutcome::Error(format!("unknown tool: {name}"));
            }
        };

        match tool.execute(params).await {
            Ok(payload) => ToolOutcome::Success(payload),
            Err(e) => {
                warn!(tool = name, error = %e, "tool execution failed");
                ToolOutcome::Error(e.to_string())
            }
        }
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use studymate_core::error::ToolError;

    /// Minimal test tool.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Text to echo" }
                },
                "required": ["text"]
            })
        }
        async fn execute(&self, params: HashMap<String, Value>) -> Result<Value, ToolError> {
            let text = params
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or("(empty)");
            Ok(json!({"echo": text}))
        }
    }

    /// Tool that always fails.
    struct FailTool;

    #[async_trait]
    impl Tool for FailTool {
        fn name(&self) -> &str {
            "fail"
        }
        fn description(&self) -> &str {
            "Always fails"
        }
        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {}, "required": []})
        }
        async fn execute(&self, _params: HashMap<String, Value>) -> Result<Value, ToolError> {
            Err(ToolError::MissingArgument("document".into()))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(EchoTool));
        assert!(reg.has("echo"));
        assert!(!reg.has("nope"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_tool_names_sorted() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(FailTool));
        reg.register(Arc::new(EchoTool));
        assert_eq!(reg.tool_names(), vec!["echo", "fail"]);
    }

    #[test]
    fn test_descriptors() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(EchoTool));
        let descriptors = reg.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].function.name, "echo");
        assert_eq!(descriptors[0].kind, "function");
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(EchoTool));
        let mut params = HashMap::new();
        params.insert("text".into(), json!("hello"));

        let outcome = reg.dispatch("echo", params).await;
        assert_eq!(outcome, ToolOutcome::Success(json!({"echo": "hello"})));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let reg = ToolRegistry::new();
        let outcome = reg.dispatch("missing", HashMap::new()).await;
        match outcome {
            ToolOutcome::Error(msg) => assert_eq!(msg, "unknown tool: missing"),
            other => panic!("expected error outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_error_folded_into_outcome() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(FailTool));
        let outcome = reg.dispatch("fail", HashMap::new()).await;
        match outcome {
            ToolOutcome::Error(msg) => {
                assert!(msg.contains("missing required argument: document"))
            }
            other => panic!("expected error outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_default() {
        let reg = ToolRegistry::default();
        assert!(reg.is_empty());
    }
}
