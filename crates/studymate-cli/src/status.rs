//! `studymate status` — show configuration and engine status.
//!
//! Shows config path, model, request parameters, document settings, and
//! the API key status for each engine.

use anyhow::Result;
use colored::Colorize;

use studymate_core::config::load_config;
use studymate_core::utils::get_data_path;
use studymate_providers::registry::ENGINES;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let data_dir = get_data_path();
    let config_path = data_dir.join("config.json");

    println!();
    println!("{}", "📚 Studymate Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Model
    println!("  {:<18} {}", "Model:".bold(), config.agent.model);

    // Temperature, tokens, turn cap
    println!(
        "  {:<18} {} | max_tokens: {} | max_turns: {}",
        "Parameters:".bold(),
        format!("temp: {}", config.agent.temperature).dimmed(),
        format!("{}", config.agent.max_tokens).dimmed(),
        format!("{}", config.agent.max_turns).dimmed(),
    );

    // Documents
    println!(
        "  {:<18} mode: {} | max_chars: {}",
        "Documents:".bold(),
        config.documents.mode,
        config.documents.max_chars,
    );

    // Gateway
    println!(
        "  {:<18} {}:{}",
        "Gateway:".bold(),
        config.gateway.host,
        config.gateway.port,
    );

    // Engines
    println!();
    println!("  {}", "Engines:".bold());
    let engines_map = config.providers.to_map();

    for spec in ENGINES {
        let status = if let Some(engine_config) = engines_map.get(spec.name) {
            if engine_config.is_configured() {
                format!("{} (key set)", "✓".green())
            } else {
                format!("{}", "· not configured".dimmed())
            }
        } else {
            format!("{}", "· not configured".dimmed())
        };
        println!("    {:<20} {}", spec.display_name, status);
    }

    println!();

    Ok(())
}
