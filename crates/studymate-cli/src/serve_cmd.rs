//! `studymate serve` — start the HTTP gateway.
//!
//! Startup sequence:
//! 1. Load config
//! 2. Build the agent (engine, document loader, tools)
//! 3. Bind and serve until interrupted

use std::sync::Arc;

use anyhow::{Context, Result};

use studymate_core::config::load_config;
use studymate_gateway::GatewayState;

use crate::helpers;

/// Run the serve command.
pub async fn run() -> Result<()> {
    helpers::print_banner();

    let config = load_config(None);
    let agent = crate::build_agent(&config)?;

    println!("  Mode: Gateway");
    println!("  Model: {}", agent.model());
    println!(
        "  Listening on http://{}:{}",
        config.gateway.host, config.gateway.port
    );
    println!();

    let state = Arc::new(GatewayState {
        agent: Arc::new(agent),
    });

    studymate_gateway::serve(state, &config.gateway.host, config.gateway.port)
        .await
        .context("gateway server failed")?;

    Ok(())
}
