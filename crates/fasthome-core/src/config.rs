//! Client configuration.
//!
//! Values come from an optional JSON file in the platform data directory,
//! then explicit overrides (CLI flags, environment) are applied on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::ConfigError;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.fasthome.io";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE_NAME: &str = "config.json";

/// Settings for the HTTP device client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from the default location, or defaults if there is none.
    pub async fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Apply explicit overrides and re-validate.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: "expected an http(s) URL".to_string(),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Get the default data directory for Fasthome tools.
pub fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "fasthome", "fasthome-devices")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    default_data_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&tmp.path().join("absent.json"))
            .await
            .unwrap();

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "https://api.fasthome.io");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_load_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"timeoutSecs": 10}"#).unwrap();

        let config = ClientConfig::load(&path).await.unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_malformed_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = ClientConfig::load(&path).await;
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_invalid_values_in_file_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"timeoutSecs": 0}"#).unwrap();

        let result = ClientConfig::load(&path).await;
        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default()
            .with_overrides(Some("http://127.0.0.1:8080".to_string()), Some(5))
            .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, 5);

        let untouched = ClientConfig::default().with_overrides(None, None).unwrap();
        assert_eq!(untouched, ClientConfig::default());
    }

    #[test]
    fn test_validate() {
        let bad_url = ClientConfig::default().with_overrides(Some("not a url".to_string()), None);
        assert!(matches!(bad_url, Err(ConfigError::InvalidBaseUrl { .. })));

        let bad_scheme =
            ClientConfig::default().with_overrides(Some("ftp://example.com".to_string()), None);
        assert!(matches!(bad_scheme, Err(ConfigError::InvalidBaseUrl { .. })));

        let zero = ClientConfig::default().with_overrides(None, Some(0));
        assert!(matches!(zero, Err(ConfigError::ZeroTimeout)));
    }
}
