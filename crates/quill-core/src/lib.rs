//! Shared foundation for quill.
//!
//! # Architecture
//!
//! - [`error`] — the provider-tagged error taxonomy ([`error::ProviderError`])
//! - [`json_path`] — JSON-pointer field extraction with raw-body fallback
//! - [`types`] — the chat message wire type shared by the OpenAI-style APIs
//! - [`config`] — config file schema + loader (`~/.quill/config.json` + env)

pub mod config;
pub mod error;
pub mod json_path;
pub mod types;

pub use error::{ProviderError, ProviderKind, Result};
