//! Tool and engine types.
//!
//! The domain side (`ToolCall`, `ToolOutcome`, `ToolResult`, `EngineReply`)
//! is what the agent loop works with. The wire side (`WireMessage`,
//! `ChatRequest`, `ChatResponse`) is the OpenAI chat completions format that
//! engines speak over HTTP. Conversions between the two live here so the
//! rest of the workspace never touches wire JSON directly.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::conversation::{Part, Role, Turn};
use crate::error::EngineError;

// ─────────────────────────────────────────────
// Tool calls and outcomes (domain side)
// ─────────────────────────────────────────────

/// A request from the engine to invoke one tool.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
    /// Engine-assigned ID, echoed back in the matching `ToolResult`.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments string, exactly as the engine produced it.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        ToolCall {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// What a tool invocation produced. Tool failures are data, not control
/// flow: they travel back to the engine as an error payload so it can
/// rephrase, retry, or apologize.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Error(String),
}

impl ToolOutcome {
    /// The JSON payload sent back to the engine.
    pub fn to_payload(&self) -> Value {
        match self {
            ToolOutcome::Success(value) => value.clone(),
            ToolOutcome::Error(message) => json!({ "error": message }),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Error(_))
    }
}

/// The outcome of one tool call, paired with the call it answers.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolResult {
    pub call_id: String,
    pub name: String,
    pub outcome: ToolOutcome,
}

// ─────────────────────────────────────────────
// Tool descriptors (advertised to the engine)
// ─────────────────────────────────────────────

/// Schema of a tool, sent with every engine request so the model knows what
/// it may call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolDescriptor {
    /// Always "function".
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionSchema,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        ToolDescriptor {
            kind: "function".to_string(),
            function: FunctionSchema {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

// ─────────────────────────────────────────────
// Engine reply (domain side)
// ─────────────────────────────────────────────

/// What the engine said in response to one submission.
#[derive(Clone, Debug, Default)]
pub struct EngineReply {
    /// Text content, if any.
    pub content: Option<String>,
    /// Tool invocations requested this turn. Empty means the reply is final.
    pub tool_calls: Vec<ToolCall>,
    /// Why the model stopped generating.
    pub finish_reason: Option<String>,
    /// Token usage reported by the API.
    pub usage: Option<UsageInfo>,
}

impl EngineReply {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Convert this reply into the assistant turn to append to the
    /// conversation.
    pub fn into_turn(self) -> Turn {
        let mut parts = Vec::new();
        if let Some(text) = self.content {
            if !text.is_empty() {
                parts.push(Part::Text(text));
            }
        }
        for tc in self.tool_calls {
            parts.push(Part::ToolCall(tc));
        }
        Turn::assistant(parts)
    }
}

/// Token usage statistics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Wire messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// A chat message in the OpenAI wire format. Each variant maps to a `role`
/// field value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum WireMessage {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: String },

    #[serde(rename = "assistant")]
    Assistant {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<WireToolCall>>,
    },

    #[serde(rename = "tool")]
    Tool {
        content: String,
        tool_call_id: String,
    },
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        WireMessage::System {
            content: content.into(),
        }
    }

    /// Flatten one domain turn into its wire messages. Assistant turns map
    /// to one message; a tool turn yields one `tool` message per result.
    pub fn from_turn(turn: &Turn) -> Vec<WireMessage> {
        match turn.role {
            Role::User => vec![WireMessage::User {
                content: turn.text(),
            }],
            Role::Assistant => {
                let text = turn.text();
                let calls: Vec<WireToolCall> = turn
                    .tool_calls()
                    .into_iter()
                    .map(WireToolCall::from)
                    .collect();
                vec![WireMessage::Assistant {
                    content: if text.is_empty() { None } else { Some(text) },
                    tool_calls: if calls.is_empty() { None } else { Some(calls) },
                }]
            }
            Role::Tool => turn
                .parts
                .iter()
                .filter_map(|p| match p {
                    Part::ToolResult(result) => Some(WireMessage::Tool {
                        content: result.outcome.to_payload().to_string(),
                        tool_call_id: result.call_id.clone(),
                    }),
                    _ => None,
                })
                .collect(),
        }
    }
}

/// A tool call in the wire format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WireToolCall {
    pub id: String,
    /// Always "function".
    #[serde(rename = "type")]
    pub kind: String,
    pub function: WireFunctionCall,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WireFunctionCall {
    pub name: String,
    /// JSON-encoded arguments string.
    pub arguments: String,
}

impl From<&ToolCall> for WireToolCall {
    fn from(tc: &ToolCall) -> Self {
        WireToolCall {
            id: tc.id.clone(),
            kind: "function".to_string(),
            function: WireFunctionCall {
                name: tc.name.clone(),
                arguments: tc.arguments.clone(),
            },
        }
    }
}

impl From<WireToolCall> for ToolCall {
    fn from(wc: WireToolCall) -> Self {
        ToolCall {
            id: wc.id,
            name: wc.function.name,
            arguments: wc.function.arguments,
        }
    }
}

// ─────────────────────────────────────────────
// Chat completion request / response bodies
// ─────────────────────────────────────────────

/// Request body for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Raw chat completions response body. Used internally for deserialization.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantBody,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantBody {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

impl TryFrom<ChatResponse> for EngineReply {
    type Error = EngineError;

    fn try_from(resp: ChatResponse) -> Result<Self, EngineError> {
        let usage = resp.usage;
        let choice = resp.choices.into_iter().next().ok_or(EngineError::EmptyReply)?;
        Ok(EngineReply {
            content: choice.message.content,
            tool_calls: choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(ToolCall::from)
                .collect(),
            finish_reason: choice.finish_reason,
            usage,
        })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
