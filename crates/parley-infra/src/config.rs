//! Client configuration loader for Parley.
//!
//! Reads `config.toml` from the config directory (`~/.config/parley/` on
//! Linux) and deserializes it into [`ClientConfig`]. Falls back to defaults
//! when the file is missing or malformed, then layers the environment and
//! command-line overrides on top.

use std::path::{Path, PathBuf};

use parley_types::config::ClientConfig;

/// Environment variable overriding the backend origin.
pub const BASE_URL_ENV: &str = "PARLEY_BASE_URL";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "PARLEY_CONFIG_DIR";

/// Resolve the config file path.
///
/// Priority:
/// 1. Explicit path (the `--config` flag)
/// 2. `PARLEY_CONFIG_DIR` environment variable
/// 3. Platform config directory (e.g., `~/.config/parley`)
/// 4. `.parley` in the current directory
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let dir = match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => dirs::config_dir()
            .map(|d| d.join("parley"))
            .unwrap_or_else(|| PathBuf::from(".parley")),
    };
    dir.join("config.toml")
}

/// Load client configuration from `path`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_client_config(path: &Path) -> ClientConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => {
            let base_url = config.base_url.clone();
            config.with_base_url(&base_url)
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ClientConfig::default()
        }
    }
}

/// Apply base URL overrides: the flag wins over the environment, which wins
/// over whatever the file said. Blank values are ignored.
pub fn apply_overrides(
    config: ClientConfig,
    flag: Option<&str>,
    env: Option<&str>,
) -> ClientConfig {
    match non_blank(flag).or(non_blank(env)) {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Load the config file and apply the environment and flag overrides.
pub async fn resolve_client_config(
    explicit_path: Option<&Path>,
    base_url_flag: Option<&str>,
) -> ClientConfig {
    let path = resolve_config_path(explicit_path);
    let config = load_client_config(&path).await;
    let env = std::env::var(BASE_URL_ENV).ok();
    let config = apply_overrides(config, base_url_flag, env.as_deref());
    tracing::debug!(base_url = %config.base_url, "client configuration resolved");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_client_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_client_config(&tmp.path().join("config.toml")).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn load_client_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
base_url = "https://chat.example.com/"
request_timeout_secs = 45
"#,
        )
        .await
        .unwrap();

        let config = load_client_config(&config_path).await;
        assert_eq!(config.base_url, "https://chat.example.com");
        assert_eq!(config.request_timeout_secs, 45);
    }

    #[tokio::test]
    async fn load_client_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "base_url = [not toml")
            .await
            .unwrap();

        let config = load_client_config(&config_path).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn resolve_config_path_prefers_explicit() {
        let path = resolve_config_path(Some(Path::new("/tmp/custom.toml")));
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn apply_overrides_flag_beats_env() {
        let config = apply_overrides(
            ClientConfig::default(),
            Some("http://flag:1"),
            Some("http://env:2"),
        );
        assert_eq!(config.base_url, "http://flag:1");
    }

    #[test]
    fn apply_overrides_env_when_no_flag() {
        let config = apply_overrides(ClientConfig::default(), None, Some("http://env:2/"));
        assert_eq!(config.base_url, "http://env:2");
    }

    #[test]
    fn apply_overrides_ignores_blank_values() {
        let config = apply_overrides(ClientConfig::default(), Some("  "), None);
        assert_eq!(config, ClientConfig::default());

        let config = apply_overrides(ClientConfig::default(), Some(""), Some("http://env:2"));
        assert_eq!(config.base_url, "http://env:2");
    }
}
