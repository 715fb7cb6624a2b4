//! Config loader — reads `~/.quill/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.quill/config.json`
//! 3. Environment variables (override JSON):
//!    - `QUILL_DEFAULTS__PROVIDER`
//!    - `QUILL_PROVIDERS__<NAME>__API_KEY` / `__API_BASE` / `__MODEL`
//!    - plain `<NAME>_API_KEY` (e.g. `OPENAI_API_KEY`), used only when no
//!      key was set by the file or a `QUILL_…` var

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::ProviderKind;

use super::schema::{env_key, Config};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".quill").join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `QUILL_<SECTION>__<FIELD>` (double underscore as
/// delimiter), plus the conventional bare `<NAME>_API_KEY` vars as a
/// last-resort key source.
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("QUILL_DEFAULTS__PROVIDER") {
        config.defaults.provider = val;
    }

    for kind in ProviderKind::ALL {
        let settings = config.providers.get_mut(kind);
        let name = kind.as_str().to_uppercase();

        if let Ok(val) = std::env::var(format!("QUILL_PROVIDERS__{name}__API_KEY")) {
            settings.api_key = val;
        }
        if let Ok(val) = std::env::var(format!("QUILL_PROVIDERS__{name}__API_BASE")) {
            settings.api_base = Some(val);
        }
        if let Ok(val) = std::env::var(format!("QUILL_PROVIDERS__{name}__MODEL")) {
            settings.model = Some(val);
        }

        // Bare OPENAI_API_KEY-style vars fill in only when nothing else did.
        if settings.api_key.is_empty() {
            if let Ok(val) = std::env::var(env_key(kind)) {
                settings.api_key = val;
            }
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        // Should return defaults
        assert_eq!(config.defaults.provider, "openai");
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "providers": {
                "mistral": { "apiKey": "m-key", "model": "mistral-small-latest" }
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.providers.mistral.api_key, "m-key");
        assert_eq!(
            config.providers.mistral.model.as_deref(),
            Some("mistral-small-latest")
        );
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.defaults.provider, "openai");
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.defaults.provider, "openai");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.defaults.provider = "anthropic".to_string();
        config.providers.anthropic.api_key = "sk-ant-test".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.defaults.provider, "anthropic");
        assert_eq!(reloaded.providers.anthropic.api_key, "sk-ant-test");
    }

    #[test]
    fn test_env_override_default_provider() {
        std::env::set_var("QUILL_DEFAULTS__PROVIDER", "gemini");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.defaults.provider, "gemini");
        std::env::remove_var("QUILL_DEFAULTS__PROVIDER");
    }

    #[test]
    fn test_env_override_provider_key() {
        std::env::set_var("QUILL_PROVIDERS__GEMINI__API_KEY", "g-env-key");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.gemini.api_key, "g-env-key");
        std::env::remove_var("QUILL_PROVIDERS__GEMINI__API_KEY");
    }

    #[test]
    fn test_env_override_beats_bare_var() {
        std::env::set_var("QUILL_PROVIDERS__OPENAI__API_KEY", "from-quill-var");
        std::env::set_var("OPENAI_API_KEY", "from-bare-var");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.openai.api_key, "from-quill-var");
        std::env::remove_var("QUILL_PROVIDERS__OPENAI__API_KEY");
        std::env::remove_var("OPENAI_API_KEY");
    }

    #[test]
    fn test_env_override_api_base() {
        std::env::set_var(
            "QUILL_PROVIDERS__OPENAI__API_BASE",
            "https://proxy.example/v1",
        );
        let config = apply_env_overrides(Config::default());
        assert_eq!(
            config.providers.openai.api_base.as_deref(),
            Some("https://proxy.example/v1")
        );
        std::env::remove_var("QUILL_PROVIDERS__OPENAI__API_BASE");
    }

    #[test]
    fn test_file_key_not_clobbered_by_bare_var() {
        let file = write_temp_json(
            r#"{
            "providers": { "anthropic": { "apiKey": "from-file" } }
        }"#,
        );
        std::env::set_var("ANTHROPIC_API_KEY", "from-bare-var");
        let config = load_config_from_path(file.path());
        assert_eq!(config.providers.anthropic.api_key, "from-file");
        std::env::remove_var("ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.providers.openai.api_base = Some("https://proxy.example/v1".to_string());
        save_config(&config, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["providers"]["openai"].get("apiKey").is_some());
        assert!(raw["providers"]["openai"].get("apiBase").is_some());
        assert!(raw["providers"]["openai"].get("api_key").is_none());
    }
}
