//! Anthropic messages client.
//!
//! `POST {base}/messages`. Auth is a raw `x-api-key` header plus a pinned
//! `anthropic-version` protocol header; the system prompt is a top-level
//! `system` field rather than a message.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error, warn};

use quill_core::error::{ProviderError, ProviderKind, Result};
use quill_core::json_path;
use quill_core::types::ChatMessage;

use crate::traits::{TextProvider, DEFAULT_SYSTEM_PROMPT, PLACEHOLDER_API_KEY};

const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model for new instances.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// JSON pointer to the generated text in a 200 response.
const TEXT_PATH: &str = "/content/0/text";
/// JSON pointer to the human-readable message in an error response.
const ERROR_PATH: &str = "/error/message";

// ─────────────────────────────────────────────
// Request parameters
// ─────────────────────────────────────────────

/// Per-call parameters. Forwarded verbatim; the service validates ranges.
#[derive(Clone, Debug)]
pub struct AnthropicParams {
    pub system_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for AnthropicParams {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 1.0,
            max_tokens: 2048,
        }
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<ChatMessage>,
}

// ─────────────────────────────────────────────
// AnthropicProvider
// ─────────────────────────────────────────────

/// Client for the Anthropic messages API.
#[derive(Debug)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_base: String,
    headers: HeaderMap,
    model: String,
}

impl AnthropicProvider {
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
            headers: build_headers(&api_key.into()),
            model: model.into(),
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.api_base)
    }

    /// Single-turn request with full parameter control.
    pub async fn simple_request_with(
        &self,
        user_prompt: &str,
        params: &AnthropicParams,
    ) -> Result<String> {
        let body = RequestBody {
            model: &self.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system: &params.system_prompt,
            messages: vec![ChatMessage::user(user_prompt)],
        };

        let url = self.messages_url();
        debug!(model = %self.model, %url, "calling Anthropic");

        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(ProviderKind::Anthropic, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(ProviderKind::Anthropic, e))?;

        if status != StatusCode::OK {
            let message = json_path::message_or_raw(&text, ERROR_PATH);
            error!(status = status.as_u16(), %message, "Anthropic API error");
            return Err(ProviderError::api(
                ProviderKind::Anthropic,
                status.as_u16(),
                message,
            ));
        }

        json_path::string_at(&text, TEXT_PATH).ok_or_else(|| {
            ProviderError::unexpected_shape(
                ProviderKind::Anthropic,
                format!("no string at `{TEXT_PATH}` in 200 response"),
            )
        })
    }
}

/// Fixed transport metadata, built once at construction time.
fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
    match HeaderValue::from_str(api_key) {
        Ok(value) => {
            headers.insert("x-api-key", value);
        }
        Err(_) => warn!("API key is not a valid header value; sending without it"),
    }
    headers
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    async fn simple_request(&self, user_prompt: &str) -> Result<String> {
        self.simple_request_with(user_prompt, &AnthropicParams::default())
            .await
    }

    fn display_name(&self) -> &str {
        "Anthropic"
    }
}

impl Default for AnthropicProvider {
    fn default() -> Self {
        Self::new(PLACEHOLDER_API_KEY, DEFAULT_MODEL)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> AnthropicProvider {
        AnthropicProvider::with_base_url("sk-ant-test", DEFAULT_MODEL, server.uri())
    }

    #[tokio::test]
    async fn test_simple_request_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "hello"}]
            })))
            .mount(&server)
            .await;

        let p = provider(&server);
        let text = p.simple_request("Say hello").await.unwrap();
        assert_eq!(text, "hello");
        assert_eq!(p.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_auth_headers_stable_across_calls() {
        let server = MockServer::start().await;

        // Both calls must carry the construction-time credential and
        // protocol version.
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "ok"}]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let p = provider(&server);
        p.simple_request("one").await.unwrap();
        p.simple_request("two").await.unwrap();
        assert_eq!(p.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_defaults_sent_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_partial_json(serde_json::json!({
                "model": DEFAULT_MODEL,
                "max_tokens": 2048,
                "temperature": 1.0,
                "system": "You are a helpful assistant.",
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "ok"}]
            })))
            .mount(&server)
            .await;

        let text = provider(&server).simple_request("hi").await.unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_custom_params_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_partial_json(serde_json::json!({
                "max_tokens": 100,
                "temperature": 0.0,
                "system": "Be terse."
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "ok"}]
            })))
            .mount(&server)
            .await;

        let params = AnthropicParams {
            system_prompt: "Be terse.".to_string(),
            temperature: 0.0,
            max_tokens: 100,
        };
        let text = provider(&server)
            .simple_request_with("hi", &params)
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_error_message_extracted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).simple_request("hi").await.unwrap_err();
        match err {
            ProviderError::Anthropic { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_raw_body_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("Overloaded"))
            .mount(&server)
            .await;

        let err = provider(&server).simple_request("hi").await.unwrap_err();
        match err {
            ProviderError::Anthropic { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_200_is_unexpected_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"content": "not an array"})),
            )
            .mount(&server)
            .await;

        let err = provider(&server).simple_request("hi").await.unwrap_err();
        match err {
            ProviderError::UnexpectedShape { provider, .. } => {
                assert_eq!(provider, ProviderKind::Anthropic);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_default_instance() {
        let p = AnthropicProvider::default();
        assert_eq!(p.model(), "claude-3-7-sonnet-20250219");
        assert_eq!(p.messages_url(), "https://api.anthropic.com/v1/messages");
    }
}
