//! Agent loop — the engine ↔ tool-calling main loop.
//!
//! One `run` owns one fresh `Conversation`: seed it with the user's prompt,
//! submit to the reasoning engine, execute any requested tool calls in
//! received order, feed the outcomes back, and stop when the engine answers
//! in plain text. Engine errors abort the run; tool errors do not.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use studymate_core::conversation::{Conversation, Turn};
use studymate_core::error::AgentError;
use studymate_core::types::{ToolCall, ToolResult};
use studymate_core::utils::truncate_string;
use studymate_docs::{AddressingMode, DocumentLoader};
use studymate_providers::traits::{EngineRequestConfig, ReasoningEngine};

use crate::prompts;
use crate::tools::registry::ToolRegistry;
use crate::tools::study::{register_study_tools, ToolContext};

/// Default maximum engine calls per run.
const DEFAULT_MAX_TURNS: usize = 10;

/// Fallback answer when the turn budget runs out before a plain-text reply.
const EXHAUSTED_FALLBACK: &str =
    "I ran out of steps before reaching a final answer. Please try a more specific request.";

// ─────────────────────────────────────────────
// Run inputs and outputs
// ─────────────────────────────────────────────

/// A labeled document reference attached to a request.
///
/// Attachments are folded into the seed prompt as `" label: value"` so the
/// engine can pass them on as tool arguments.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub label: String,
    pub value: String,
}

impl Attachment {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Attachment {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The outcome of one completed agent run.
#[derive(Clone, Debug)]
pub struct AgentRun {
    /// The engine's final plain-text answer.
    pub text: String,
    /// Names of the tools invoked, in execution order.
    pub tools_invoked: Vec<String>,
}

// ─────────────────────────────────────────────
// AgentLoop
// ─────────────────────────────────────────────

/// The main agent loop: submits conversations to the engine and dispatches
/// tool calls. One instance serves many runs; each run gets its own
/// conversation.
pub struct AgentLoop {
    engine: Arc<dyn ReasoningEngine>,
    tools: ToolRegistry,
    model: String,
    max_turns: usize,
    request: EngineRequestConfig,
}

impl AgentLoop {
    /// Create a new agent loop with the four study tools registered.
    pub fn new(
        engine: Arc<dyn ReasoningEngine>,
        loader: Arc<dyn DocumentLoader>,
        mode: AddressingMode,
        model: Option<String>,
        max_turns: Option<usize>,
        request: Option<EngineRequestConfig>,
    ) -> Self {
        let model = model.unwrap_or_else(|| engine.default_model().to_string());
        let max_turns = max_turns.unwrap_or(DEFAULT_MAX_TURNS);
        let request = request.unwrap_or_default();

        let context = Arc::new(ToolContext {
            engine: engine.clone(),
            loader,
            mode,
            model: model.clone(),
            request: request.clone(),
        });

        let mut tools = ToolRegistry::new();
        register_study_tools(&mut tools, context);

        info!(
            model = %model,
            tools = tools.len(),
            max_turns = max_turns,
            "agent loop initialized"
        );

        Self {
            engine,
            tools,
            model,
            max_turns,
            request,
        }
    }

    /// Run one request to completion.
    ///
    /// The conversation is created fresh, lives for this run only, and is
    /// discarded with the returned answer.
    pub async fn run(
        &self,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<AgentRun, AgentError> {
        let mut seed = prompt.to_string();
        for attachment in attachments {
            seed.push_str(&format!(" {}: {}", attachment.label, attachment.value));
        }

        let mut conversation = Conversation::new();
        conversation.push(Turn::user(seed));

        let descriptors = self.tools.descriptors();
        let mut tools_invoked: Vec<String> = Vec::new();
        let mut final_text: Option<String> = None;

        for turn_index in 0..self.max_turns {
            debug!(turn = turn_index, "engine call");

            let reply = self
                .engine
                .submit(
                    &conversation,
                    prompts::SYSTEM_INSTRUCTION,
                    &descriptors,
                    &self.model,
                    &self.request,
                )
                .await?;

            if reply.has_tool_calls() {
                let calls: Vec<ToolCall> = reply.tool_calls.clone();
                conversation.push(reply.into_turn());

                // Sequential dispatch, in received order. Each result gets
                // its own tool turn before the next engine call.
                for tc in &calls {
                    let params: HashMap<String, Value> =
                        serde_json::from_str(&tc.arguments).unwrap_or_default();

                    info!(tool = %tc.name, turn = turn_index, "executing tool call");

                    let outcome = self.tools.dispatch(&tc.name, params).await;
                    if outcome.is_error() {
                        debug!(tool = %tc.name, "tool returned an error outcome");
                    }

                    tools_invoked.push(tc.name.clone());
                    conversation.push(Turn::tool_result(ToolResult {
                        call_id: tc.id.clone(),
                        name: tc.name.clone(),
                        outcome,
                    }));
                }
            } else {
                // A no-tool-call turn terminates the run, even with empty
                // content. The fallback below is for cap exhaustion only.
                let turn = reply.into_turn();
                final_text = Some(turn.text());
                conversation.push(turn);
                break;
            }
        }

        let text = match final_text {
            Some(text) => text,
            None => {
                warn!(
                    max_turns = self.max_turns,
                    "turn budget exhausted without a final answer"
                );
                EXHAUSTED_FALLBACK.to_string()
            }
        };

        debug!(
            text = %truncate_string(&text, 120),
            tools = tools_invoked.len(),
            "run complete"
        );

        Ok(AgentRun { text, tools_invoked })
    }

    /// Get a reference to the tool registry (for testing/extension).
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
