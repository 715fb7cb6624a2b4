//! Mistral chat completions client.
//!
//! Same wire shape as OpenAI's chat completions except the system prompt
//! uses the `system` role, the token cap is named `max_tokens`, and error
//! bodies carry their message at `detail[0].msg` instead of `error.message`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

use quill_core::error::{ProviderError, ProviderKind, Result};
use quill_core::json_path;
use quill_core::types::ChatMessage;

use crate::traits::{TextProvider, DEFAULT_SYSTEM_PROMPT, PLACEHOLDER_API_KEY};

const DEFAULT_API_BASE: &str = "https://api.mistral.ai/v1";

/// Default model for new instances.
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

/// JSON pointer to the generated text in a 200 response.
const TEXT_PATH: &str = "/choices/0/message/content";
/// JSON pointer to the human-readable message in an error response.
const ERROR_PATH: &str = "/detail/0/msg";

// ─────────────────────────────────────────────
// Request parameters
// ─────────────────────────────────────────────

/// Per-call parameters. Forwarded verbatim; the service validates ranges.
#[derive(Clone, Debug)]
pub struct MistralParams {
    pub system_prompt: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl Default for MistralParams {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.7,
            top_p: 1.0,
            max_tokens: 2048,
        }
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

// ─────────────────────────────────────────────
// MistralProvider
// ─────────────────────────────────────────────

/// Client for the Mistral chat completions API.
#[derive(Debug)]
pub struct MistralProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl MistralProvider {
    /// Create a client against the production endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_API_BASE)
    }

    /// Create a client against a custom base URL (proxies, mock servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: crate::http_client(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Single-turn request with full parameter control.
    pub async fn simple_request_with(
        &self,
        user_prompt: &str,
        params: &MistralParams,
    ) -> Result<String> {
        let body = RequestBody {
            model: &self.model,
            temperature: params.temperature,
            top_p: params.top_p,
            max_tokens: params.max_tokens,
            messages: vec![
                ChatMessage::system(&params.system_prompt),
                ChatMessage::user(user_prompt),
            ],
        };

        let url = self.completions_url();
        debug!(model = %self.model, %url, "calling Mistral");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(ProviderKind::Mistral, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(ProviderKind::Mistral, e))?;

        if status != StatusCode::OK {
            let message = json_path::message_or_raw(&text, ERROR_PATH);
            error!(status = status.as_u16(), %message, "Mistral API error");
            return Err(ProviderError::api(
                ProviderKind::Mistral,
                status.as_u16(),
                message,
            ));
        }

        json_path::string_at(&text, TEXT_PATH).ok_or_else(|| {
            ProviderError::unexpected_shape(
                ProviderKind::Mistral,
                format!("no string at `{TEXT_PATH}` in 200 response"),
            )
        })
    }
}

#[async_trait]
impl TextProvider for MistralProvider {
    async fn simple_request(&self, user_prompt: &str) -> Result<String> {
        self.simple_request_with(user_prompt, &MistralParams::default())
            .await
    }

    fn display_name(&self) -> &str {
        "Mistral"
    }
}

impl Default for MistralProvider {
    fn default() -> Self {
        Self::new(PLACEHOLDER_API_KEY, DEFAULT_MODEL)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
