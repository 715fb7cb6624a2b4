//! Wire types shared by the OpenAI-style chat APIs.
//!
//! OpenAI, Mistral, and Anthropic all carry conversation turns as
//! `{role, content}` objects; only the set of accepted roles differs.
//! Gemini's parts-based format is different enough that its types live with
//! its client instead.

use serde::{Deserialize, Serialize};

/// A single `{role, content}` chat turn.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// A `system` turn (Mistral's system-prompt carrier).
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// A `developer` turn (OpenAI's system-prompt carrier).
    pub fn developer(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "developer".to_string(),
            content: content.into(),
        }
    }

    /// A `user` turn.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
