//! Generic HTTP engine for OpenAI-compatible chat completions APIs.
//!
//! Covers Gemini (OpenAI-compat endpoint), OpenAI, Anthropic, DeepSeek,
//! Groq, and OpenRouter. One implementation, parameterized by `EngineSpec`
//! and the user's provider config.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, error, warn};

use studymate_core::conversation::Conversation;
use studymate_core::error::EngineError;
use studymate_core::types::{ChatRequest, ChatResponse, EngineReply, ToolDescriptor, WireMessage};

use crate::registry::{resolve_model_name, EngineSpec, ProviderConfig};
use crate::traits::{EngineRequestConfig, ReasoningEngine};

// ─────────────────────────────────────────────
// HttpEngine
// ─────────────────────────────────────────────

/// A reasoning engine that talks to any OpenAI-compatible HTTP API.
pub struct HttpEngine {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.deepseek.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Default model for this engine instance.
    default_model: String,
    /// Extra headers to send with each request.
    extra_headers: HeaderMap,
    /// Static spec for model resolution and logging.
    spec: &'static EngineSpec,
}

impl std::fmt::Debug for HttpEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEngine")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .field("engine", &self.spec.display_name)
            .finish()
    }
}

impl HttpEngine {
    /// Create a new HttpEngine from a provider config and spec.
    pub fn new(config: &ProviderConfig, spec: &'static EngineSpec, model: &str) -> Self {
        // Resolve API base: config > spec default > standard OpenAI path
        let api_base = config
            .api_base
            .clone()
            .or_else(|| spec.default_api_base.map(String::from))
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        let mut extra_headers = HeaderMap::new();
        if let Some(ref headers) = config.extra_headers {
            for (key, value) in headers {
                if let (Ok(name), Ok(val)) = (
                    HeaderName::from_bytes(key.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    extra_headers.insert(name, val);
                } else {
                    warn!("Invalid header: {}={}", key, value);
                }
            }
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        HttpEngine {
            client,
            api_base,
            api_key: config.api_key.clone(),
            default_model: model.to_string(),
            extra_headers,
            spec,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    async fn post_chat(&self, request_body: &ChatRequest) -> Result<EngineReply, EngineError> {
        let url = self.completions_url();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .headers(self.extra_headers.clone())
            .json(request_body)
            .send()
            .await
            .map_err(|e| {
                error!(engine = self.spec.display_name, error = %e, "HTTP request failed");
                EngineError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                engine = self.spec.display_name,
                status = %status,
                body = %error_text,
                "API error"
            );
            return Err(EngineError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let chat_resp = response.json::<ChatResponse>().await.map_err(|e| {
            error!(
                engine = self.spec.display_name,
                error = %e,
                "Failed to parse engine response"
            );
            EngineError::MalformedResponse(e.to_string())
        })?;

        let reply = EngineReply::try_from(chat_resp)?;
        debug!(
            engine = self.spec.display_name,
            has_content = reply.content.is_some(),
            tool_calls = reply.tool_calls.len(),
            finish_reason = reply.finish_reason.as_deref().unwrap_or("?"),
            "Engine reply received"
        );
        Ok(reply)
    }
}

#[async_trait]
impl ReasoningEngine for HttpEngine {
    async fn submit(
        &self,
        conversation: &Conversation,
        system_instruction: &str,
        tools: &[ToolDescriptor],
        model: &str,
        config: &EngineRequestConfig,
    ) -> Result<EngineReply, EngineError> {
        let resolved_model = resolve_model_name(model, self.spec);

        let mut messages = vec![WireMessage::system(system_instruction)];
        for turn in conversation.turns() {
            messages.extend(WireMessage::from_turn(turn));
        }

        debug!(
            engine = self.spec.display_name,
            model = %resolved_model,
            messages = messages.len(),
            tools = tools.len(),
            "Submitting conversation"
        );

        let request_body = ChatRequest {
            model: resolved_model,
            messages,
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.to_vec())
            },
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
        };

        self.post_chat(&request_body).await
    }

    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        config: &EngineRequestConfig,
    ) -> Result<String, EngineError> {
        let resolved_model = resolve_model_name(model, self.spec);

        debug!(
            engine = self.spec.display_name,
            model = %resolved_model,
            prompt_chars = prompt.len(),
            "One-shot completion"
        );

        let request_body = ChatRequest {
            model: resolved_model,
            messages: vec![WireMessage::User {
                content: prompt.to_string(),
            }],
            tools: None,
            tool_choice: None,
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
        };

        let reply = self.post_chat(&request_body).await?;
        reply.content.ok_or(EngineError::EmptyReply)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        self.spec.display_name
    }
}

// ─────────────────────────────────────────────
// Builder (convenience)
// ─────────────────────────────────────────────

/// Build an HttpEngine from a model name and a map of provider configs.
///
/// Matches the model to a configured backend, or fails with
/// `EngineError::NotConfigured`.
pub fn create_engine(
    model: &str,
    providers: &std::collections::HashMap<String, ProviderConfig>,
) -> Result<HttpEngine, EngineError> {
    let (config, spec) = crate::registry::match_engine(model, providers)
        .ok_or_else(|| EngineError::NotConfigured(model.to_string()))?;

    debug!(
        engine = spec.display_name,
        model = model,
        api_base = config.api_base.as_deref().unwrap_or("default"),
        "Creating reasoning engine"
    );

    Ok(HttpEngine::new(config, spec, model))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_name;
    use std::collections::HashMap;
    use studymate_core::conversation::Turn;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_config(api_key: &str, api_base: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.to_string(),
            api_base: api_base.map(String::from),
            extra_headers: None,
        }
    }

    fn one_turn(prompt: &str) -> Conversation {
        let mut conv = Conversation::new();
        conv.push(Turn::user(prompt));
        conv
    }

    // ── Unit tests ──

    #[test]
    fn test_completions_url_trailing_slash() {
        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some("https://api.openai.com/v1/"));
        let engine = HttpEngine::new(&config, spec, "gpt-4o");
        assert_eq!(
            engine.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_default_api_base_from_spec() {
        let spec = find_by_name("deepseek").unwrap();
        let config = make_config("ds-key", None);
        let engine = HttpEngine::new(&config, spec, "deepseek-chat");
        assert_eq!(engine.api_base, "https://api.deepseek.com/v1");
    }

    #[test]
    fn test_config_overrides_default_base() {
        let spec = find_by_name("openrouter").unwrap();
        let config = make_config("sk-or-abc", Some("https://custom.proxy.com/v1"));
        let engine = HttpEngine::new(&config, spec, "meta-llama/llama-3");
        assert_eq!(engine.api_base, "https://custom.proxy.com/v1");
    }

    #[test]
    fn test_display_name() {
        let spec = find_by_name("gemini").unwrap();
        let config = make_config("key", None);
        let engine = HttpEngine::new(&config, spec, "gemini-2.5-flash");
        assert_eq!(engine.display_name(), "Gemini");
    }

    #[test]
    fn test_extra_headers() {
        let spec = find_by_name("openrouter").unwrap();
        let mut headers = HashMap::new();
        headers.insert("X-Title".to_string(), "studymate".to_string());
        let config = ProviderConfig {
            api_key: "key".to_string(),
            api_base: None,
            extra_headers: Some(headers),
        };
        let engine = HttpEngine::new(&config, spec, "gpt-4o");
        assert!(engine.extra_headers.contains_key("x-title"));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_submit_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": "Mitochondria produce ATP.",
                        "tool_calls": null
                    },
                    "finish_reason": "stop"
                }],
                "usage": {
                    "prompt_tokens": 10,
                    "completion_tokens": 5,
                    "total_tokens": 15
                }
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("openai").unwrap();
        let config = make_config("test-key-123", Some(&mock_server.uri()));
        let engine = HttpEngine::new(&config, spec, "gpt-4o");

        let reply = engine
            .submit(
                &one_turn("What do mitochondria do?"),
                "You are a study assistant.",
                &[],
                "gpt-4o",
                &EngineRequestConfig::default(),
            )
            .await
            .unwrap();

        assert_eq!(reply.content.as_deref(), Some("Mitochondria produce ATP."));
        assert!(!reply.has_tool_calls());
        assert_eq!(reply.usage.as_ref().unwrap().total_tokens, 15);
    }

    #[tokio::test]
    async fn test_submit_with_tool_calls() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc123",
                            "type": "function",
                            "function": {
                                "name": "summarize_text",
                                "arguments": "{\"document\": \"ch1.txt\"}"
                            }
                        }]
                    },
                    "finish_reason": "tool_calls"
                }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some(&mock_server.uri()));
        let engine = HttpEngine::new(&config, spec, "gpt-4o");

        let descriptor = ToolDescriptor::new(
            "summarize_text",
            "Summarize a document",
            serde_json::json!({"type": "object", "properties": {"document": {"type": "string"}}}),
        );

        let reply = engine
            .submit(
                &one_turn("Summarize chapter 1"),
                "You are a study assistant.",
                &[descriptor],
                "gpt-4o",
                &EngineRequestConfig::default(),
            )
            .await
            .unwrap();

        assert!(reply.content.is_none());
        assert!(reply.has_tool_calls());
        assert_eq!(reply.tool_calls[0].name, "summarize_text");
        assert_eq!(reply.tool_calls[0].id, "call_abc123");
    }

    #[tokio::test]
    async fn test_submit_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(serde_json::json!({
                    "error": {
                        "message": "Rate limit exceeded",
                        "type": "rate_limit_error"
                    }
                })),
            )
            .mount(&mock_server)
            .await;

        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some(&mock_server.uri()));
        let engine = HttpEngine::new(&config, spec, "gpt-4o");

        let err = engine
            .submit(
                &one_turn("Hello"),
                "sys",
                &[],
                "gpt-4o",
                &EngineRequestConfig::default(),
            )
            .await
            .unwrap_err();

        match err {
            EngineError::Api { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("Rate limit exceeded"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_network_error() {
        // Point to a port that's not listening
        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some("http://127.0.0.1:1"));
        let engine = HttpEngine::new(&config, spec, "gpt-4o");

        let err = engine
            .submit(
                &one_turn("Hello"),
                "sys",
                &[],
                "gpt-4o",
                &EngineRequestConfig::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Request(_)));
    }

    #[tokio::test]
    async fn test_submit_sends_correct_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gemini-2.5-flash",
                "max_tokens": 4096,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "test"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "content": "ok" },
                    "finish_reason": "stop"
                }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("gemini").unwrap();
        let config = make_config("g-key", Some(&mock_server.uri()));
        let engine = HttpEngine::new(&config, spec, "gemini-2.5-flash");

        // Routing prefix is stripped before the body is serialized
        let reply = engine
            .submit(
                &one_turn("test"),
                "sys",
                &[],
                "gemini/gemini-2.5-flash",
                &EngineRequestConfig::default(),
            )
            .await
            .unwrap();

        // If the body matcher fails, wiremock returns 404 → Api error
        assert_eq!(reply.content.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_complete_returns_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "content": "1. What is osmosis?" },
                    "finish_reason": "stop"
                }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("gemini").unwrap();
        let config = make_config("key", Some(&mock_server.uri()));
        let engine = HttpEngine::new(&config, spec, "gemini-2.5-flash");

        let text = engine
            .complete(
                "Generate one question about osmosis",
                "gemini-2.5-flash",
                &EngineRequestConfig::default(),
            )
            .await
            .unwrap();

        assert_eq!(text, "1. What is osmosis?");
    }

    #[tokio::test]
    async fn test_complete_empty_content_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "content": null },
                    "finish_reason": "stop"
                }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some(&mock_server.uri()));
        let engine = HttpEngine::new(&config, spec, "gpt-4o");

        let err = engine
            .complete("prompt", "gpt-4o", &EngineRequestConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::EmptyReply));
    }

    // ── create_engine ──

    #[test]
    fn test_create_engine_success() {
        let mut providers = HashMap::new();
        providers.insert("gemini".to_string(), make_config("g-123", None));

        let engine = create_engine("gemini-2.5-flash", &providers).unwrap();
        assert_eq!(engine.display_name(), "Gemini");
        assert_eq!(engine.default_model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_create_engine_not_configured() {
        let providers = HashMap::new();
        let err = create_engine("gemini-2.5-flash", &providers).unwrap_err();
        assert!(matches!(err, EngineError::NotConfigured(_)));
        assert!(err.to_string().contains("gemini-2.5-flash"));
    }
}
