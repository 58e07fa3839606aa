//! Engine registry — static specs for the supported backends.
//!
//! Each `EngineSpec` describes how to connect to one backend: keywords for
//! model matching, the env var carrying its key, and its chat completions
//! base URL.

use std::collections::HashMap;

/// Re-export the provider config from core — single source of truth.
pub use studymate_core::config::schema::ProviderConfig;

// ─────────────────────────────────────────────
// EngineSpec — static metadata for one backend
// ─────────────────────────────────────────────

/// Static specification describing one engine backend.
#[derive(Clone, Debug)]
pub struct EngineSpec {
    /// Internal name (e.g. `"gemini"`).
    pub name: &'static str,
    /// Keywords to match in model names (lowercase).
    pub keywords: &'static [&'static str],
    /// Environment variable for the API key.
    pub env_key: &'static str,
    /// Human-readable name for logs.
    pub display_name: &'static str,
    /// Whether this is a gateway/aggregator (OpenRouter). Gateways are the
    /// fallback when no direct match is found.
    pub is_gateway: bool,
    /// Default OpenAI-compatible API base URL.
    pub default_api_base: Option<&'static str>,
}

// ─────────────────────────────────────────────
// Supported backends (in matching priority order)
// ─────────────────────────────────────────────

/// Complete list of supported engine specifications.
pub static ENGINES: &[EngineSpec] = &[
    EngineSpec {
        name: "gemini",
        keywords: &["gemini"],
        env_key: "GEMINI_API_KEY",
        display_name: "Gemini",
        is_gateway: false,
        default_api_base: Some("https://generativelanguage.googleapis.com/v1beta/openai"),
    },
    EngineSpec {
        name: "openai",
        keywords: &["openai", "gpt"],
        env_key: "OPENAI_API_KEY",
        display_name: "OpenAI",
        is_gateway: false,
        default_api_base: None,
    },
    EngineSpec {
        name: "anthropic",
        keywords: &["anthropic", "claude"],
        env_key: "ANTHROPIC_API_KEY",
        display_name: "Anthropic",
        is_gateway: false,
        default_api_base: Some("https://api.anthropic.com/v1"),
    },
    EngineSpec {
        name: "deepseek",
        keywords: &["deepseek"],
        env_key: "DEEPSEEK_API_KEY",
        display_name: "DeepSeek",
        is_gateway: false,
        default_api_base: Some("https://api.deepseek.com/v1"),
    },
    EngineSpec {
        name: "groq",
        keywords: &["groq", "llama"],
        env_key: "GROQ_API_KEY",
        display_name: "Groq",
        is_gateway: false,
        default_api_base: Some("https://api.groq.com/openai/v1"),
    },
    EngineSpec {
        name: "openrouter",
        keywords: &["openrouter"],
        env_key: "OPENROUTER_API_KEY",
        display_name: "OpenRouter",
        is_gateway: true,
        default_api_base: Some("https://openrouter.ai/api/v1"),
    },
];

// ─────────────────────────────────────────────
// Matching functions
// ─────────────────────────────────────────────

/// Find an engine spec by matching keywords against a model name.
///
/// Skips gateways — those are fallback only.
pub fn find_by_model(model: &str) -> Option<&'static EngineSpec> {
    let model_lower = model.to_lowercase();
    ENGINES.iter().find(|spec| {
        !spec.is_gateway && spec.keywords.iter().any(|kw| model_lower.contains(kw))
    })
}

/// Find an engine spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static EngineSpec> {
    ENGINES.iter().find(|spec| spec.name == name)
}

/// Strip a routing prefix (e.g. `"gemini/gemini-2.5-flash"`) when the model
/// name carries this backend's own name. Direct endpoints expect the bare
/// model identifier.
pub fn resolve_model_name(model: &str, spec: &EngineSpec) -> String {
    let routed = format!("{}/", spec.name);
    match model.strip_prefix(&routed) {
        Some(bare) => bare.to_string(),
        None => model.to_string(),
    }
}

/// Match a model name to a configured backend.
///
/// 1. Direct keyword match, only if that backend has an API key.
/// 2. Fallback to the first configured gateway.
pub fn match_engine<'a>(
    model: &str,
    providers: &'a HashMap<String, ProviderConfig>,
) -> Option<(&'a ProviderConfig, &'static EngineSpec)> {
    if let Some(spec) = find_by_model(model) {
        if let Some(config) = providers.get(spec.name) {
            if config.is_configured() {
                return Some((config, spec));
            }
        }
    }

    ENGINES.iter().filter(|s| s.is_gateway).find_map(|spec| {
        providers
            .get(spec.name)
            .filter(|c| c.is_configured())
            .map(|c| (c, spec))
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_model_gemini() {
        let spec = find_by_model("gemini-2.5-flash").unwrap();
        assert_eq!(spec.name, "gemini");
    }

    #[test]
    fn test_find_by_model_gpt() {
        let spec = find_by_model("gpt-4o-mini").unwrap();
        assert_eq!(spec.name, "openai");
    }

    #[test]
    fn test_find_by_model_claude() {
        let spec = find_by_model("claude-sonnet-4-20250514").unwrap();
        assert_eq!(spec.name, "anthropic");
    }

    #[test]
    fn test_find_by_model_deepseek() {
        let spec = find_by_model("deepseek-chat").unwrap();
        assert_eq!(spec.name, "deepseek");
    }

    #[test]
    fn test_find_by_model_skips_gateway() {
        // "openrouter/anthropic/claude-3" matches anthropic, not the gateway
        let spec = find_by_model("openrouter/anthropic/claude-3").unwrap();
        assert_eq!(spec.name, "anthropic");
    }

    #[test]
    fn test_find_by_model_unknown() {
        assert!(find_by_model("some-random-model-xyz").is_none());
    }

    #[test]
    fn test_find_by_name() {
        let spec = find_by_name("groq").unwrap();
        assert_eq!(spec.display_name, "Groq");
        assert_eq!(spec.env_key, "GROQ_API_KEY");
    }

    #[test]
    fn test_resolve_model_strips_own_prefix() {
        let spec = find_by_name("gemini").unwrap();
        assert_eq!(
            resolve_model_name("gemini/gemini-2.5-flash", spec),
            "gemini-2.5-flash"
        );
    }

    #[test]
    fn test_resolve_model_passthrough() {
        let spec = find_by_name("gemini").unwrap();
        assert_eq!(
            resolve_model_name("gemini-2.5-flash", spec),
            "gemini-2.5-flash"
        );
    }

    #[test]
    fn test_match_engine_direct() {
        let mut providers = HashMap::new();
        providers.insert(
            "gemini".to_string(),
            ProviderConfig {
                api_key: "g-123".to_string(),
                ..Default::default()
            },
        );

        let (config, spec) = match_engine("gemini-2.5-flash", &providers).unwrap();
        assert_eq!(spec.name, "gemini");
        assert_eq!(config.api_key, "g-123");
    }

    #[test]
    fn test_match_engine_gateway_fallback() {
        let mut providers = HashMap::new();
        providers.insert(
            "openrouter".to_string(),
            ProviderConfig {
                api_key: "sk-or-fallback".to_string(),
                ..Default::default()
            },
        );

        let (config, spec) = match_engine("some-unknown-model", &providers).unwrap();
        assert_eq!(spec.name, "openrouter");
        assert_eq!(config.api_key, "sk-or-fallback");
    }

    #[test]
    fn test_match_engine_no_key() {
        let mut providers = HashMap::new();
        providers.insert(
            "gemini".to_string(),
            ProviderConfig {
                api_key: "".to_string(),
                ..Default::default()
            },
        );

        assert!(match_engine("gemini-2.5-flash", &providers).is_none());
    }

    #[test]
    fn test_all_engines_have_unique_names() {
        let names: Vec<&str> = ENGINES.iter().map(|s| s.name).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "Duplicate engine names found");
    }
}
