//! Provider clients for quill — one HTTP adapter per text-generation
//! backend, all speaking the same prompt-in/text-out contract.
//!
//! # Architecture
//!
//! - [`traits::TextProvider`] — the common capability trait
//! - [`openai::OpenAiProvider`] — chat completions, bearer auth
//! - [`anthropic::AnthropicProvider`] — messages API, `x-api-key` header
//! - [`gemini::GeminiProvider`] — generateContent, key as query parameter
//! - [`mistral::MistralProvider`] — chat completions, bearer auth
//!
//! Each client is independent: per-instance HTTP client, no shared state,
//! one request per call, no retries.

use std::time::Duration;

pub mod anthropic;
pub mod gemini;
pub mod mistral;
pub mod openai;
pub mod traits;

// Re-export main types for convenience
pub use anthropic::{AnthropicParams, AnthropicProvider};
pub use gemini::{GeminiParams, GeminiProvider};
pub use mistral::{MistralParams, MistralProvider};
pub use openai::{OpenAiParams, OpenAiProvider};
pub use quill_core::{ProviderError, ProviderKind, Result};
pub use traits::{TextProvider, DEFAULT_SYSTEM_PROMPT, PLACEHOLDER_API_KEY};

/// Build the HTTP client every provider instance owns.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .expect("Failed to build HTTP client")
}
