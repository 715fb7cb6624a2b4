//! Quill CLI — entry point.
//!
//! # Commands
//!
//! - `quill ask [-p PROVIDER] [-m MODEL] [-s SYSTEM] [sampling flags] PROMPT`
//!   — send one prompt, print the generated text
//! - `quill status` — show configuration and provider status

mod helpers;
mod status;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use quill_core::config::{self, env_key, ProviderSettings};
use quill_core::error::ProviderKind;
use quill_providers::{
    AnthropicParams, AnthropicProvider, GeminiParams, GeminiProvider, MistralParams,
    MistralProvider, OpenAiParams, OpenAiProvider,
};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ✒ Quill — one front door to four text-generation APIs
#[derive(Parser)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single prompt and print the generated text
    Ask(AskArgs),

    /// Show configuration and provider status
    Status,
}

#[derive(Args)]
struct AskArgs {
    /// The user prompt
    prompt: String,

    /// Provider to use: openai, anthropic, gemini, or mistral
    #[arg(short, long)]
    provider: Option<String>,

    /// Model identifier (defaults to the provider's configured or built-in model)
    #[arg(short, long)]
    model: Option<String>,

    /// System prompt
    #[arg(short, long)]
    system: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f64>,

    /// Nucleus sampling cutoff
    #[arg(long)]
    top_p: Option<f64>,

    /// Top-k sampling cutoff (Gemini only)
    #[arg(long)]
    top_k: Option<u32>,

    /// Maximum tokens to generate
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask(args) => {
            init_logging(args.logs);
            run_ask(args).await
        }
        Commands::Status => {
            init_logging(false);
            status::run()
        }
    }
}

// ─────────────────────────────────────────────
// Ask command
// ─────────────────────────────────────────────

async fn run_ask(args: AskArgs) -> Result<()> {
    let config = config::load_config(None);

    let name = args
        .provider
        .clone()
        .unwrap_or_else(|| config.defaults.provider.clone());
    let kind: ProviderKind = name.parse()?;

    let settings = config.providers.get(kind).clone();
    if !settings.is_configured() {
        bail!(
            "no API key configured for {} — set {} or add it to {}",
            kind,
            env_key(kind),
            config::get_config_path().display()
        );
    }

    let model = helpers::resolve_model(args.model.clone(), settings.model.clone(), kind);

    let text = dispatch(kind, &settings, model, &args)
        .await
        .with_context(|| format!("{kind} request failed"))?;

    helpers::print_response(kind.display_name(), &text);
    Ok(())
}

/// Build the concrete provider for `kind` and run the request with any
/// sampling overrides applied on top of that provider's defaults.
async fn dispatch(
    kind: ProviderKind,
    settings: &ProviderSettings,
    model: String,
    args: &AskArgs,
) -> quill_core::Result<String> {
    if args.top_k.is_some() && kind != ProviderKind::Gemini {
        warn!("--top-k is only understood by Gemini; ignoring it");
    }

    match kind {
        ProviderKind::OpenAi => {
            let provider = match &settings.api_base {
                Some(base) => OpenAiProvider::with_base_url(&settings.api_key, model, base),
                None => OpenAiProvider::new(&settings.api_key, model),
            };
            let mut params = OpenAiParams::default();
            if let Some(s) = &args.system {
                params.system_prompt = s.clone();
            }
            if let Some(t) = args.temperature {
                params.temperature = t;
            }
            if let Some(p) = args.top_p {
                params.top_p = p;
            }
            if let Some(n) = args.max_tokens {
                params.max_completion_tokens = n;
            }
            provider.simple_request_with(&args.prompt, &params).await
        }
        ProviderKind::Anthropic => {
            let provider = match &settings.api_base {
                Some(base) => AnthropicProvider::with_base_url(&settings.api_key, model, base),
                None => AnthropicProvider::new(&settings.api_key, model),
            };
            let mut params = AnthropicParams::default();
            if let Some(s) = &args.system {
                params.system_prompt = s.clone();
            }
            if let Some(t) = args.temperature {
                params.temperature = t;
            }
            if let Some(n) = args.max_tokens {
                params.max_tokens = n;
            }
            provider.simple_request_with(&args.prompt, &params).await
        }
        ProviderKind::Gemini => {
            let provider = match &settings.api_base {
                Some(base) => GeminiProvider::with_base_url(&settings.api_key, model, base),
                None => GeminiProvider::new(&settings.api_key, model),
            };
            let mut params = GeminiParams::default();
            if let Some(s) = &args.system {
                params.system_prompt = s.clone();
            }
            if let Some(t) = args.temperature {
                params.temperature = t;
            }
            if let Some(k) = args.top_k {
                params.top_k = k;
            }
            if let Some(p) = args.top_p {
                params.top_p = p;
            }
            if let Some(n) = args.max_tokens {
                params.max_output_tokens = n;
            }
            provider.simple_request_with(&args.prompt, &params).await
        }
        ProviderKind::Mistral => {
            let provider = match &settings.api_base {
                Some(base) => MistralProvider::with_base_url(&settings.api_key, model, base),
                None => MistralProvider::new(&settings.api_key, model),
            };
            let mut params = MistralParams::default();
            if let Some(s) = &args.system {
                params.system_prompt = s.clone();
            }
            if let Some(t) = args.temperature {
                params.temperature = t;
            }
            if let Some(p) = args.top_p {
                params.top_p = p;
            }
            if let Some(n) = args.max_tokens {
                params.max_tokens = n;
            }
            provider.simple_request_with(&args.prompt, &params).await
        }
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("quill_core=debug,quill_providers=debug,quill_cli=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
