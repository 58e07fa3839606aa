//! Shared CLI helpers — attachment assembly, response printing, banner.

use colored::Colorize;

use studymate_agent::{AgentRun, Attachment};
use studymate_core::utils::expand_home;

/// Fold the optional `--chapter` / `--questions` flags into attachments.
/// Leading `~` is expanded here; the document loader reads paths verbatim.
pub fn build_attachments(chapter: Option<String>, questions: Option<String>) -> Vec<Attachment> {
    let mut attachments = Vec::new();
    if let Some(chapter) = chapter {
        attachments.push(Attachment::new(
            "chapter file",
            expand_home(&chapter).to_string_lossy(),
        ));
    }
    if let Some(questions) = questions {
        attachments.push(Attachment::new(
            "questions file",
            expand_home(&questions).to_string_lossy(),
        ));
    }
    attachments
}

/// Print an agent run to stdout.
pub fn print_response(run: &AgentRun) {
    println!();
    println!("{}", "📚 Studymate".cyan().bold());
    if run.text.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{}", run.text);
    }
    if !run.tools_invoked.is_empty() {
        println!("{}", format_tools_line(&run.tools_invoked).dimmed());
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "📚 Studymate".cyan().bold(), version.dimmed());
    println!("{}", "Type a message, or \"exit\" to quit.".dimmed());
    println!();
}

/// Print a "thinking" placeholder (for non-log mode).
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

fn format_tools_line(tools: &[String]) -> String {
    format!("[tools: {}]", tools.join(", "))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
