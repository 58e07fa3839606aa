//! Document references — how a tool argument names a document.

use std::path::PathBuf;

/// How raw document strings in tool arguments are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressingMode {
    /// The string is a filesystem path.
    #[default]
    Path,
    /// The string is an abstract handle resolved by the deployment's
    /// document backend.
    Handle,
}

impl AddressingMode {
    /// Parse a mode name from config ("path" or "handle"). Unknown names
    /// fall back to `Path`.
    pub fn from_config(name: &str) -> Self {
        match name {
            "handle" => AddressingMode::Handle,
            _ => AddressingMode::Path,
        }
    }
}

/// A resolved reference to one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentRef {
    Path(PathBuf),
    Handle(String),
}

impl DocumentRef {
    /// Interpret a raw tool-argument string under the given mode.
    pub fn parse(raw: &str, mode: AddressingMode) -> Self {
        match mode {
            AddressingMode::Path => DocumentRef::Path(PathBuf::from(raw)),
            AddressingMode::Handle => DocumentRef::Handle(raw.to_string()),
        }
    }

    /// Human-readable form for log lines and error payloads.
    pub fn display(&self) -> String {
        match self {
            DocumentRef::Path(p) => p.display().to_string(),
            DocumentRef::Handle(h) => h.clone(),
        }
    }
}
