//! The study tool set — summarize, generate, extract, conceptualize.
//!
//! Each tool follows the same shape: resolve its document argument(s)
//! through the loader, wrap the extracted text in a fixed instructional
//! template, and hand the synthesis to the reasoning engine with a one-shot
//! completion. Tools never see the conversation history.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use studymate_core::error::ToolError;
use studymate_docs::{AddressingMode, DocumentLoader, DocumentRef};
use studymate_providers::traits::{EngineRequestConfig, ReasoningEngine};

use super::base::{require_string, Tool};
use crate::prompts;

// ─────────────────────────────────────────────
// Shared context
// ─────────────────────────────────────────────

/// Collaborators shared by every study tool.
pub struct ToolContext {
    pub engine: Arc<dyn ReasoningEngine>,
    pub loader: Arc<dyn DocumentLoader>,
    pub mode: AddressingMode,
    pub model: String,
    pub request: EngineRequestConfig,
}

impl ToolContext {
    /// Resolve one raw document argument to extracted text.
    fn load(&self, raw: &str) -> Result<String, ToolError> {
        let doc = DocumentRef::parse(raw, self.mode);
        debug!(document = %doc.display(), "loading document");
        Ok(self.loader.load(&doc)?)
    }

    /// Run one synthesis pass over an assembled prompt.
    async fn synthesize(&self, prompt: String) -> Result<String, ToolError> {
        Ok(self.engine.complete(&prompt, &self.model, &self.request).await?)
    }
}

/// Register all four study tools against a shared context.
pub fn register_study_tools(
    registry: &mut super::registry::ToolRegistry,
    context: Arc<ToolContext>,
) {
    registry.register(Arc::new(SummarizeTextTool::new(context.clone())));
    registry.register(Arc::new(GenerateQuestionsTool::new(context.clone())));
    registry.register(Arc::new(ExtractQuestionsTool::new(context.clone())));
    registry.register(Arc::new(ConceptualizeQuestionsTool::new(context)));
}

fn document_schema(arg: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            arg: { "type": "string", "description": description }
        },
        "required": [arg]
    })
}

// ─────────────────────────────────────────────
// summarize_text
// ─────────────────────────────────────────────

/// Condense a chapter into a structured summary.
pub struct SummarizeTextTool {
    context: Arc<ToolContext>,
}

impl SummarizeTextTool {
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for SummarizeTextTool {
    fn name(&self) -> &str {
        "summarize_text"
    }

    fn description(&self) -> &str {
        "Create a summary of the chapter content"
    }

    fn parameters(&self) -> Value {
        document_schema("document", "The chapter document to summarize")
    }

    async fn execute(&self, params: HashMap<String, Value>) -> Result<Value, ToolError> {
        let raw = require_string(&params, "document")?;
        let content = self.context.load(&raw)?;
        let summary = self
            .context
            .synthesize(prompts::summarize_prompt(&content))
            .await?;
        Ok(json!({ "summary": summary }))
    }
}

// ─────────────────────────────────────────────
// generate_questions
// ─────────────────────────────────────────────

/// Generate practice questions spanning multiple cognitive levels.
pub struct GenerateQuestionsTool {
    context: Arc<ToolContext>,
}

impl GenerateQuestionsTool {
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for GenerateQuestionsTool {
    fn name(&self) -> &str {
        "generate_questions"
    }

    fn description(&self) -> &str {
        "Generate high-quality practice questions from a textbook chapter"
    }

    fn parameters(&self) -> Value {
        document_schema("document", "The chapter document to generate questions from")
    }

    async fn execute(&self, params: HashMap<String, Value>) -> Result<Value, ToolError> {
        let raw = require_string(&params, "document")?;
        let content = self.context.load(&raw)?;
        let questions = self
            .context
            .synthesize(prompts::generate_questions_prompt(&content))
            .await?;
        Ok(json!({ "questions": questions }))
    }
}

// ─────────────────────────────────────────────
// extract_questions
// ─────────────────────────────────────────────

/// From a question collection, keep only the questions belonging to the
/// given chapter.
pub struct ExtractQuestionsTool {
    context: Arc<ToolContext>,
}

impl ExtractQuestionsTool {
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for ExtractQuestionsTool {
    fn name(&self) -> &str {
        "extract_questions"
    }

    fn description(&self) -> &str {
        "Extract only the questions that belong to the given chapter from a question collection"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "chapter_document": {
                    "type": "string",
                    "description": "The chapter document the questions must match"
                },
                "questions_document": {
                    "type": "string",
                    "description": "The document holding the question collection"
                }
            },
            "required": ["chapter_document", "questions_document"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> Result<Value, ToolError> {
        let chapter_raw = require_string(&params, "chapter_document")?;
        let questions_raw = require_string(&params, "questions_document")?;
        let chapter = self.context.load(&chapter_raw)?;
        let questions = self.context.load(&questions_raw)?;
        let extracted = self
            .context
            .synthesize(prompts::extract_questions_prompt(&chapter, &questions))
            .await?;
        Ok(json!({ "extractedQuestions": extracted }))
    }
}

// ─────────────────────────────────────────────
// conceptualize_questions
// ─────────────────────────────────────────────

/// Explain the concepts a student must understand to answer a set of
/// questions.
pub struct ConceptualizeQuestionsTool {
    context: Arc<ToolContext>,
}

impl ConceptualizeQuestionsTool {
    pub fn new(context: Arc<ToolContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for ConceptualizeQuestionsTool {
    fn name(&self) -> &str {
        "conceptualize_questions"
    }

    fn description(&self) -> &str {
        "Explain the concepts underlying a set of questions"
    }

    fn parameters(&self) -> Value {
        document_schema(
            "questions_document",
            "The document holding the questions to conceptualize",
        )
    }

    async fn execute(&self, params: HashMap<String, Value>) -> Result<Value, ToolError> {
        let raw = require_string(&params, "questions_document")?;
        let questions = self.context.load(&raw)?;
        let concepts = self
            .context
            .synthesize(prompts::conceptualize_prompt(&questions))
            .await?;
        Ok(json!({ "concepts": concepts }))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::registry::ToolRegistry;
    use std::io::Write;
    use studymate_core::conversation::Conversation;
    use studymate_core::error::{EngineError, ExtractionError};
    use studymate_core::types::{EngineReply, ToolDescriptor};
    use studymate_docs::FsDocumentLoader;
    use tempfile::NamedTempFile;

    /// Engine stub whose `complete` echoes the prompt back with a marker.
    struct EchoEngine;

    #[async_trait]
    impl ReasoningEngine for EchoEngine {
        async fn submit(
            &self,
            _conversation: &Conversation,
            _system_instruction: &str,
            _tools: &[ToolDescriptor],
            _model: &str,
            _config: &EngineRequestConfig,
        ) -> Result<EngineReply, EngineError> {
            Err(EngineError::EmptyReply)
        }

        async fn complete(
            &self,
            prompt: &str,
            _model: &str,
            _config: &EngineRequestConfig,
        ) -> Result<String, EngineError> {
            Ok(format!("SYNTH[{}]", prompt.len()))
        }

        fn default_model(&self) -> &str {
            "echo-model"
        }

        fn display_name(&self) -> &str {
            "EchoEngine"
        }
    }

    fn test_context() -> Arc<ToolContext> {
        Arc::new(ToolContext {
            engine: Arc::new(EchoEngine),
            loader: Arc::new(FsDocumentLoader::new(60_000)),
            mode: AddressingMode::Path,
            model: "echo-model".to_string(),
            request: EngineRequestConfig::default(),
        })
    }

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn doc_param(key: &str, file: &NamedTempFile) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert(key.into(), json!(file.path().to_str().unwrap()));
        params
    }

    #[tokio::test]
    async fn test_summarize_returns_summary_payload() {
        let file = write_temp("The cell is the basic unit of life.");
        let tool = SummarizeTextTool::new(test_context());

        let payload = tool.execute(doc_param("document", &file)).await.unwrap();
        let summary = payload["summary"].as_str().unwrap();
        assert!(summary.starts_with("SYNTH["));
    }

    #[tokio::test]
    async fn test_summarize_missing_argument() {
        let tool = SummarizeTextTool::new(test_context());
        let err = tool.execute(HashMap::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(key) if key == "document"));
    }

    #[tokio::test]
    async fn test_summarize_missing_file() {
        let tool = SummarizeTextTool::new(test_context());
        let mut params = HashMap::new();
        params.insert("document".into(), json!("/nonexistent/ch1.txt"));

        let err = tool.execute(params).await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::Extraction(ExtractionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_questions_payload() {
        let file = write_temp("Chapter about osmosis.");
        let tool = GenerateQuestionsTool::new(test_context());

        let payload = tool.execute(doc_param("document", &file)).await.unwrap();
        assert!(payload["questions"].is_string());
    }

    #[tokio::test]
    async fn test_extract_questions_needs_both_documents() {
        let chapter = write_temp("Chapter text.");
        let tool = ExtractQuestionsTool::new(test_context());

        // Only the chapter — questions_document is missing
        let err = tool
            .execute(doc_param("chapter_document", &chapter))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(key) if key == "questions_document"));
    }

    #[tokio::test]
    async fn test_extract_questions_payload() {
        let chapter = write_temp("Chapter about sorting algorithms.");
        let questions = write_temp("1. What is quicksort?\n2. What is osmosis?");
        let tool = ExtractQuestionsTool::new(test_context());

        let mut params = doc_param("chapter_document", &chapter);
        params.insert(
            "questions_document".into(),
            json!(questions.path().to_str().unwrap()),
        );

        let payload = tool.execute(params).await.unwrap();
        assert!(payload["extractedQuestions"].is_string());
    }

    #[tokio::test]
    async fn test_conceptualize_payload() {
        let questions = write_temp("1. Explain Big-O notation.");
        let tool = ConceptualizeQuestionsTool::new(test_context());

        let payload = tool
            .execute(doc_param("questions_document", &questions))
            .await
            .unwrap();
        assert!(payload["concepts"].is_string());
    }

    #[tokio::test]
    async fn test_handle_mode_rejected_by_fs_loader() {
        let context = Arc::new(ToolContext {
            engine: Arc::new(EchoEngine),
            loader: Arc::new(FsDocumentLoader::new(60_000)),
            mode: AddressingMode::Handle,
            model: "echo-model".to_string(),
            request: EngineRequestConfig::default(),
        });
        let tool = SummarizeTextTool::new(context);

        let mut params = HashMap::new();
        params.insert("document".into(), json!("doc-42"));

        let err = tool.execute(params).await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::Extraction(ExtractionError::HandleUnsupported(_))
        ));
    }

    #[test]
    fn test_register_study_tools() {
        let mut registry = ToolRegistry::new();
        register_study_tools(&mut registry, test_context());

        assert_eq!(
            registry.tool_names(),
            vec![
                "conceptualize_questions",
                "extract_questions",
                "generate_questions",
                "summarize_text"
            ]
        );
    }
}
