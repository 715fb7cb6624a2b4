//! The provider trait — one capability, four backends.
//!
//! Each backend keeps its own parameter names and defaults on an inherent
//! `simple_request_with` method; this trait covers the common case (defaults
//! for everything but the prompt) so callers can hold a `dyn TextProvider`
//! without caring which backend is behind it.

use async_trait::async_trait;
use quill_core::Result;

/// System prompt used when the caller doesn't supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Placeholder credential baked into `Default` provider instances.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// Trait that all text-generation providers implement.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Single-turn prompt-in/text-out call with this provider's default
    /// sampling parameters and system prompt.
    ///
    /// # Returns
    /// The generated text, or a provider-tagged error.
    async fn simple_request(&self, user_prompt: &str) -> Result<String>;

    /// Display name for logging (e.g. `"OpenAI"`).
    fn display_name(&self) -> &str;
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnthropicProvider, GeminiProvider, MistralProvider, OpenAiProvider};

    #[test]
    fn test_trait_objects() {
        let providers: Vec<Box<dyn TextProvider>> = vec![
            Box::new(OpenAiProvider::default()),
            Box::new(AnthropicProvider::default()),
            Box::new(GeminiProvider::default()),
            Box::new(MistralProvider::default()),
        ];

        let names: Vec<&str> = providers.iter().map(|p| p.display_name()).collect();
        assert_eq!(names, vec!["OpenAI", "Anthropic", "Gemini", "Mistral"]);
    }
}
