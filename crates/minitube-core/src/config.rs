//! Configuration module
//!
//! Client configuration is read from `MINITUBE_*` environment variables, with an
//! optional `.env` file loaded first. The credential is never looked up
//! implicitly by the HTTP client: callers read `token` (or a session file) and
//! pass it in when constructing the client.

use serde::Deserialize;
use std::path::PathBuf;

const ENV_PREFIX: &str = "MINITUBE_";
const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_FFPROBE_PATH: &str = "ffprobe";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const PROBE_TIMEOUT_SECS: u64 = 30;
const TRANSFER_CHUNK_SIZE: usize = 256 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Log output format for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Minitube client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the metadata API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token; takes precedence over a stored session
    #[serde(default)]
    pub token: Option<String>,
    /// Override for the CLI session file location
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// Read size used when streaming a file to storage
    #[serde(default = "default_transfer_chunk_size")]
    pub transfer_chunk_size: usize,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_ffprobe_path() -> String {
    DEFAULT_FFPROBE_PATH.to_string()
}

fn default_request_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn default_probe_timeout_secs() -> u64 {
    PROBE_TIMEOUT_SECS
}

fn default_transfer_chunk_size() -> usize {
    TRANSFER_CHUNK_SIZE
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            session_file: None,
            ffprobe_path: default_ffprobe_path(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            probe_timeout_secs: PROBE_TIMEOUT_SECS,
            transfer_chunk_size: TRANSFER_CHUNK_SIZE,
            log_format: LogFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment (and `.env` if present), then validate it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_vars(std::env::vars())?;
        tracing::debug!(
            api_url = %config.api_url,
            has_token = config.token().is_some(),
            "Loaded client configuration"
        );
        Ok(config)
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: ClientConfig = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let api_url = self.api_url.trim();
        if api_url.is_empty() {
            return Err(ConfigError::Invalid(
                "MINITUBE_API_URL must not be empty".to_string(),
            ));
        }
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "MINITUBE_API_URL must be an http(s) URL, got {}",
                api_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "MINITUBE_REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "MINITUBE_PROBE_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        if self.transfer_chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "MINITUBE_TRANSFER_CHUNK_SIZE must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Token from configuration, ignoring blank values
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.token(), None);
        assert_eq!(config.ffprobe_path, "ffprobe");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.probe_timeout_secs, 30);
        assert_eq!(config.transfer_chunk_size, 256 * 1024);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_prefixed_values() {
        let config = ClientConfig::from_vars(vars(&[
            ("MINITUBE_API_URL", "https://api.example.com"),
            ("MINITUBE_TOKEN", "abc123"),
            ("MINITUBE_REQUEST_TIMEOUT_SECS", "5"),
            ("MINITUBE_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.token(), Some("abc123"));
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = ClientConfig::from_vars(vars(&[("MINITUBE_TOKEN", "   ")])).unwrap();
        assert_eq!(config.token(), None);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = ClientConfig::from_vars(vars(&[("MINITUBE_API_URL", "ftp://example.com")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        let err = ClientConfig::from_vars(vars(&[("MINITUBE_TRANSFER_CHUNK_SIZE", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("TRANSFER_CHUNK_SIZE"));
    }

    #[test]
    fn test_rejects_unparseable_number() {
        let err = ClientConfig::from_vars(vars(&[("MINITUBE_PROBE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }
}
