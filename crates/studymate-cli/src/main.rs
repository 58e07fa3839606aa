//! Studymate CLI — entry point.
//!
//! # Commands
//!
//! - `studymate ask [-m MESSAGE] [--chapter FILE] [--questions FILE]` — ask the
//!   study assistant (single-shot or REPL)
//! - `studymate onboard` — initialize config
//! - `studymate status` — show configuration and engine status
//! - `studymate serve` — start the HTTP gateway

mod helpers;
mod onboard;
mod repl;
mod serve_cmd;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use studymate_agent::AgentLoop;
use studymate_core::config::{load_config, Config};
use studymate_docs::{AddressingMode, FsDocumentLoader};
use studymate_providers::http_engine::create_engine;
use studymate_providers::traits::EngineRequestConfig;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 📚 Studymate — AI study assistant for chapters and question sets
#[derive(Parser)]
#[command(name = "studymate", version, about, long_about = None)]
struct Cli {
    /// Omitting the subcommand starts the interactive REPL.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the study assistant (single-shot or interactive REPL)
    Ask {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Chapter document to make available to the assistant
        #[arg(long)]
        chapter: Option<String>,

        /// Questions document to make available to the assistant
        #[arg(long)]
        questions: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize configuration
    Onboard,

    /// Show configuration and engine status
    Status,

    /// Start the HTTP gateway
    Serve {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ask {
            message,
            chapter,
            questions,
            logs,
        }) => {
            init_logging(logs);
            run_ask(message, chapter, questions).await
        }
        Some(Commands::Onboard) => onboard::run(),
        Some(Commands::Status) => status::run(),
        Some(Commands::Serve { logs }) => {
            init_logging(logs);
            serve_cmd::run().await
        }
        // Bare `studymate` drops into the REPL.
        None => {
            init_logging(false);
            run_ask(None, None, None).await
        }
    }
}

// ─────────────────────────────────────────────
// Ask command
// ─────────────────────────────────────────────

async fn run_ask(
    message: Option<String>,
    chapter: Option<String>,
    questions: Option<String>,
) -> Result<()> {
    let config = load_config(None);
    let agent = build_agent(&config)?;

    let attachments = helpers::build_attachments(chapter, questions);

    match message {
        Some(msg) => {
            // Single-shot mode
            info!(model = agent.model(), "processing single message");
            let run = agent
                .run(&msg, &attachments)
                .await
                .context("agent run failed")?;
            helpers::print_response(&run);
        }
        None => {
            // Interactive REPL mode
            repl::run(agent, &attachments).await?;
        }
    }

    Ok(())
}

/// Build an `AgentLoop` from the loaded configuration.
pub fn build_agent(config: &Config) -> Result<AgentLoop> {
    let model = &config.agent.model;

    let engines_map = config.providers.to_map();
    let engine = create_engine(model, &engines_map).map_err(|e| anyhow::anyhow!(e))?;

    let loader = FsDocumentLoader::new(config.documents.max_chars);
    let mode = AddressingMode::from_config(&config.documents.mode);

    let request = EngineRequestConfig {
        max_tokens: config.agent.max_tokens,
        temperature: config.agent.temperature,
    };

    Ok(AgentLoop::new(
        Arc::new(engine),
        Arc::new(loader),
        mode,
        Some(model.clone()),
        Some(config.agent.max_turns as usize),
        Some(request),
    ))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("studymate=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
