//! Configuration schema.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::error::ProviderKind;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.quill/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub defaults: Defaults,
    pub providers: ProvidersConfig,
}

/// Defaults applied when the caller doesn't pick explicitly.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Defaults {
    /// Provider used when no `--provider` flag is given.
    pub provider: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Per-provider settings: one block for each of the four backends.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub openai: ProviderSettings,
    pub anthropic: ProviderSettings,
    pub gemini: ProviderSettings,
    pub mistral: ProviderSettings,
}

impl ProvidersConfig {
    /// Settings block for a given provider kind.
    pub fn get(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Mistral => &self.mistral,
        }
    }

    /// Mutable settings block for a given provider kind.
    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &mut self.openai,
            ProviderKind::Anthropic => &mut self.anthropic,
            ProviderKind::Gemini => &mut self.gemini,
            ProviderKind::Mistral => &mut self.mistral,
        }
    }
}

/// Settings for a single provider (API key, base URL, model).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// API key for authentication.
    #[serde(default)]
    pub api_key: String,
    /// Custom API base URL (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model to use instead of the provider's built-in default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderSettings {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Conventional API-key environment variable for a provider
/// (e.g. `OPENAI_API_KEY`).
pub fn env_key(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "OPENAI_API_KEY",
        ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        ProviderKind::Gemini => "GEMINI_API_KEY",
        ProviderKind::Mistral => "MISTRAL_API_KEY",
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.provider, "openai");
        assert!(!config.providers.openai.is_configured());
    }

    #[test]
    fn test_get_by_kind() {
        let mut config = Config::default();
        config.providers.gemini.api_key = "g-key".to_string();

        let settings = config.providers.get(ProviderKind::Gemini);
        assert!(settings.is_configured());
        assert_eq!(settings.api_key, "g-key");
        assert!(!config.providers.get(ProviderKind::Mistral).is_configured());
    }

    #[test]
    fn test_env_key_names() {
        assert_eq!(env_key(ProviderKind::OpenAi), "OPENAI_API_KEY");
        assert_eq!(env_key(ProviderKind::Anthropic), "ANTHROPIC_API_KEY");
        assert_eq!(env_key(ProviderKind::Gemini), "GEMINI_API_KEY");
        assert_eq!(env_key(ProviderKind::Mistral), "MISTRAL_API_KEY");
    }

    #[test]
    fn test_camel_case_keys() {
        let mut config = Config::default();
        config.providers.openai.api_base = Some("https://proxy.example/v1".to_string());

        let json = serde_json::to_value(&config).unwrap();
        assert!(json["providers"]["openai"].get("apiBase").is_some());
        assert!(json["providers"]["openai"].get("api_base").is_none());
    }
}
