//! Gemini generateContent client.
//!
//! Unlike the other backends, auth travels as a `key` query parameter and
//! the model identifier is part of the URL path, so the endpoint varies with
//! the configured model. The request body is parts-based rather than
//! `{role, content}` messages.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

use quill_core::error::{ProviderError, ProviderKind, Result};
use quill_core::json_path;

use crate::traits::{TextProvider, DEFAULT_SYSTEM_PROMPT, PLACEHOLDER_API_KEY};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for new instances.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// JSON pointer to the generated text in a 200 response.
const TEXT_PATH: &str = "/candidates/0/content/parts/0/text";
/// JSON pointer to the human-readable message in an error response.
const ERROR_PATH: &str = "/error/message";

// ─────────────────────────────────────────────
// Request parameters
// ─────────────────────────────────────────────

/// Per-call parameters. Forwarded verbatim; the service validates ranges.
#[derive(Clone, Debug)]
pub struct GeminiParams {
    pub system_prompt: String,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GeminiParams {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 1.0,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

// ─────────────────────────────────────────────
// GeminiProvider
// ─────────────────────────────────────────────

/// Client for the Gemini generateContent API.
#[derive(Debug)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
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

    /// The endpoint embeds the model, so it follows the configuration.
    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Single-turn request with full parameter control.
    pub async fn simple_request_with(
        &self,
        user_prompt: &str,
        params: &GeminiParams,
    ) -> Result<String> {
        let body = RequestBody {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: user_prompt }],
            }],
            system_instruction: Content {
                role: "user",
                parts: vec![Part {
                    text: &params.system_prompt,
                }],
            },
            generation_config: GenerationConfig {
                temperature: params.temperature,
                top_k: params.top_k,
                top_p: params.top_p,
                max_output_tokens: params.max_output_tokens,
                response_mime_type: "text/plain",
            },
        };

        let url = self.generate_url();
        debug!(model = %self.model, %url, "calling Gemini");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(ProviderKind::Gemini, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(ProviderKind::Gemini, e))?;

        if status != StatusCode::OK {
            let message = json_path::message_or_raw(&text, ERROR_PATH);
            error!(status = status.as_u16(), %message, "Gemini API error");
            return Err(ProviderError::api(
                ProviderKind::Gemini,
                status.as_u16(),
                message,
            ));
        }

        json_path::string_at(&text, TEXT_PATH).ok_or_else(|| {
            ProviderError::unexpected_shape(
                ProviderKind::Gemini,
                format!("no string at `{TEXT_PATH}` in 200 response"),
            )
        })
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    async fn simple_request(&self, user_prompt: &str) -> Result<String> {
        self.simple_request_with(user_prompt, &GeminiParams::default())
            .await
    }

    fn display_name(&self) -> &str {
        "Gemini"
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new(PLACEHOLDER_API_KEY, DEFAULT_MODEL)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
