//! Reasoning engine trait — the seam between the agent loop and the model.
//!
//! Every backend (Gemini, OpenAI, DeepSeek, Groq, …) implements this trait.
//! The `HttpEngine` in `http_engine.rs` covers all OpenAI-compatible APIs.

use async_trait::async_trait;

use studymate_core::conversation::Conversation;
use studymate_core::error::EngineError;
use studymate_core::types::{EngineReply, ToolDescriptor};

/// Per-call request parameters.
#[derive(Clone, Debug)]
pub struct EngineRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for EngineRequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// A model backend the agent can reason with.
///
/// Engine failures are always typed errors, never replies: the agent loop
/// treats any `EngineError` as fatal for the current run.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Submit the full conversation plus the tool catalog and get the
    /// engine's next turn.
    async fn submit(
        &self,
        conversation: &Conversation,
        system_instruction: &str,
        tools: &[ToolDescriptor],
        model: &str,
        config: &EngineRequestConfig,
    ) -> Result<EngineReply, EngineError>;

    /// One-shot text completion with no tools and no history. Used by tools
    /// that need a synthesis pass over extracted document text.
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        config: &EngineRequestConfig,
    ) -> Result<String, EngineError>;

    /// The default model for this engine instance.
    fn default_model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
