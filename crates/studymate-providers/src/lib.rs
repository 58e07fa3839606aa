//! Studymate providers — reasoning engine backends.
//!
//! The `ReasoningEngine` trait is the seam between the agent loop and
//! whatever model serves it. `HttpEngine` covers every OpenAI-compatible
//! chat completions API; the registry maps model names to configured
//! backends.

pub mod http_engine;
pub mod registry;
pub mod traits;

pub use http_engine::{create_engine, HttpEngine};
pub use registry::{find_by_model, find_by_name, match_engine, EngineSpec, ENGINES};
pub use traits::{EngineRequestConfig, ReasoningEngine};
