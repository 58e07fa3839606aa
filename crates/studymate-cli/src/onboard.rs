//! `studymate onboard` — initialize configuration.
//!
//! Creates `~/.studymate/config.json` with defaults and the directories
//! the CLI expects.

use anyhow::Result;
use colored::Colorize;

use studymate_core::config::{load_config, save_config};
use studymate_core::utils::get_data_path;
use studymate_providers::registry::ENGINES;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "📚 Studymate — Setup".cyan().bold());
    println!();

    let data_dir = get_data_path();
    let config_path = data_dir.join("config.json");

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. Create history directory
    let history_dir = data_dir.join("history");
    std::fs::create_dir_all(&history_dir)?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    // 3. Show how to configure an API key
    println!();
    println!("  {}", "Next: add an API key.".bold());
    println!(
        "  {}",
        "Either edit the providers section of config.json, or set one of:".dimmed()
    );
    for spec in ENGINES {
        println!("    {}", env_key_hint(spec.name).dimmed());
    }

    println!();
    println!(
        "{}",
        "  Setup complete! Run `studymate ask` to start.".green()
    );
    println!();

    Ok(())
}

/// The environment variable that overrides a provider's API key.
fn env_key_hint(name: &str) -> String {
    format!("STUDYMATE_PROVIDERS__{}__API_KEY", name.to_uppercase())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
