//! Studymate agent — the reasoning loop and its study tools.
//!
//! The `AgentLoop` owns one run: it seeds a conversation from the user's
//! prompt, submits it to the reasoning engine together with the tool
//! catalog, dispatches any tool calls the engine requests, and stops when
//! the engine answers in plain text.

pub mod agent_loop;
pub mod prompts;
pub mod tools;

pub use agent_loop::{AgentLoop, AgentRun, Attachment};
pub use tools::base::Tool;
pub use tools::registry::ToolRegistry;
