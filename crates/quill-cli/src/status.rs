//! `quill status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use quill_core::config::{self, env_key};
use quill_core::error::ProviderKind;

use crate::helpers;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = config::load_config(None);
    let config_path = config::get_config_path();

    println!();
    println!("{}", "✒ Quill Status".cyan().bold());
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

    // Default provider
    println!(
        "  {:<18} {}",
        "Default provider:".bold(),
        config.defaults.provider
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());

    for kind in ProviderKind::ALL {
        let settings = config.providers.get(kind);
        let key_status = if settings.is_configured() {
            format!("{} (key set)", "✓".green())
        } else {
            format!(
                "{} (set {})",
                "· not configured".dimmed(),
                env_key(kind).dimmed()
            )
        };
        let model = settings
            .model
            .clone()
            .unwrap_or_else(|| helpers::default_model(kind).to_string());
        println!(
            "    {:<12} {:<28} {}",
            kind.display_name(),
            model.dimmed(),
            key_status
        );
    }

    println!();

    Ok(())
}
