//! Conversation model — role-attributed turns made of parts.
//!
//! A `Conversation` lives for exactly one agent run. It is append-only:
//! `push` is the only mutating operation, and the turn vector is private so
//! nothing can reorder or edit history after the fact.

use crate::types::{ToolCall, ToolResult};

/// Who produced a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// One piece of a turn: freeform text, a tool-invocation request, or a
/// tool-invocation result.
#[derive(Clone, Debug, PartialEq)]
pub enum Part {
    Text(String),
    ToolCall(ToolCall),
    ToolResult(ToolResult),
}

/// One message-equivalent unit in a conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Turn {
    /// A user turn containing a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// An assistant turn containing a single text part.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Turn {
            role: Role::Assistant,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// An assistant turn with arbitrary parts (text and/or tool calls).
    pub fn assistant(parts: Vec<Part>) -> Self {
        Turn {
            role: Role::Assistant,
            parts,
        }
    }

    /// A tool-role turn carrying one invocation result.
    pub fn tool_result(result: ToolResult) -> Self {
        Turn {
            role: Role::Tool,
            parts: vec![Part::ToolResult(result)],
        }
    }

    /// All tool-invocation requests in this turn, in part order.
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::ToolCall(tc) => Some(tc),
                _ => None,
            })
            .collect()
    }

    /// Concatenation of all text parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Whether the turn contains at least one tool-invocation request.
    pub fn has_tool_calls(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, Part::ToolCall(_)))
    }
}

/// An ordered, append-only sequence of turns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. Turns are never removed or reordered.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Read access to the turn history.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recently appended turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
