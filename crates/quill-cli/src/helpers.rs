//! Shared CLI helpers — model resolution and response printing.

use colored::Colorize;
use quill_core::error::ProviderKind;
use quill_providers::{anthropic, gemini, mistral, openai};

/// Built-in default model for a provider.
pub fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => openai::DEFAULT_MODEL,
        ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
        ProviderKind::Gemini => gemini::DEFAULT_MODEL,
        ProviderKind::Mistral => mistral::DEFAULT_MODEL,
    }
}

/// Pick the model for a call: CLI flag > config file > built-in default.
pub fn resolve_model(
    flag: Option<String>,
    configured: Option<String>,
    kind: ProviderKind,
) -> String {
    flag.or(configured)
        .unwrap_or_else(|| default_model(kind).to_string())
}

/// Print a generated response to stdout.
pub fn print_response(provider: &str, response: &str) {
    println!();
    println!("{}", format!("✒ {provider}").cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
