//! Error taxonomy for quill — one tagged variant per backend.
//!
//! Every non-200 response becomes the variant for the provider that produced
//! it, carrying the HTTP status and a resolved message. Transport failures
//! and 200-with-garbage responses get their own variants so callers can
//! match on them without string inspection.

use thiserror::Error;

// ─────────────────────────────────────────────
// ProviderKind
// ─────────────────────────────────────────────

/// The four supported text-generation backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    Mistral,
}

impl ProviderKind {
    /// All kinds, in a stable display order.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Gemini,
        ProviderKind::Mistral,
    ];

    /// Internal name (e.g. `"openai"`), as used in config keys and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Mistral => "mistral",
        }
    }

    /// Human-readable name for logs and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Mistral => "Mistral",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Raised when parsing a provider name that isn't one of the four backends.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown provider '{0}' (expected openai, anthropic, gemini, or mistral)")]
pub struct UnknownProvider(pub String);

impl std::str::FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, UnknownProvider> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "gemini" => Ok(ProviderKind::Gemini),
            "mistral" => Ok(ProviderKind::Mistral),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────
// ProviderError
// ─────────────────────────────────────────────

/// A failed `simple_request`, tagged with the backend that produced it.
///
/// The first four variants share the `{status, message}` shape: any non-200
/// HTTP response maps to the variant of its provider, with `message` resolved
/// from the provider's documented error field when the body parses, or the
/// raw body text when it doesn't.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OpenAI API error (status {status}): {message}")]
    OpenAi { status: u16, message: String },

    #[error("Anthropic API error (status {status}): {message}")]
    Anthropic { status: u16, message: String },

    #[error("Gemini API error (status {status}): {message}")]
    Gemini { status: u16, message: String },

    #[error("Mistral API error (status {status}): {message}")]
    Mistral { status: u16, message: String },

    /// The request never produced an HTTP response (DNS, refused connection,
    /// timeout).
    #[error("{provider} request failed in transit: {source}")]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered 200 but the body didn't carry the expected
    /// field.
    #[error("{provider} returned an unexpected response shape: {detail}")]
    UnexpectedShape {
        provider: ProviderKind,
        detail: String,
    },
}

impl ProviderError {
    /// Build the `{status, message}` variant for `provider`.
    pub fn api(provider: ProviderKind, status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match provider {
            ProviderKind::OpenAi => ProviderError::OpenAi { status, message },
            ProviderKind::Anthropic => ProviderError::Anthropic { status, message },
            ProviderKind::Gemini => ProviderError::Gemini { status, message },
            ProviderKind::Mistral => ProviderError::Mistral { status, message },
        }
    }

    /// Wrap a transport-level failure.
    pub fn transport(provider: ProviderKind, source: reqwest::Error) -> Self {
        ProviderError::Transport { provider, source }
    }

    /// Build the malformed-200 variant.
    pub fn unexpected_shape(provider: ProviderKind, detail: impl Into<String>) -> Self {
        ProviderError::UnexpectedShape {
            provider,
            detail: detail.into(),
        }
    }

    /// Which backend this error came from.
    pub fn provider(&self) -> ProviderKind {
        match self {
            ProviderError::OpenAi { .. } => ProviderKind::OpenAi,
            ProviderError::Anthropic { .. } => ProviderKind::Anthropic,
            ProviderError::Gemini { .. } => ProviderKind::Gemini,
            ProviderError::Mistral { .. } => ProviderKind::Mistral,
            ProviderError::Transport { provider, .. } => *provider,
            ProviderError::UnexpectedShape { provider, .. } => *provider,
        }
    }

    /// The HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::OpenAi { status, .. }
            | ProviderError::Anthropic { status, .. }
            | ProviderError::Gemini { status, .. }
            | ProviderError::Mistral { status, .. } => Some(*status),
            ProviderError::Transport { .. } | ProviderError::UnexpectedShape { .. } => None,
        }
    }
}

/// Result type alias for quill.
pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
