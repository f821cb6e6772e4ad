//! Shared pieces of the `minitube` binary: logging setup, the stored login
//! session, upload progress display and table rendering.

pub mod progress;
pub mod session;
pub mod table;

use anyhow::{Context, Result};
use minitube_api_client::{ApiClient, Auth, VideoFile};
use minitube_core::models::VideoStatus;
use minitube_core::{ClientConfig, FileValidation, LogFormat};
use std::path::Path;

use session::SessionStore;

/// Initialize tracing. Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// Credential for API calls: `MINITUBE_TOKEN` first, then the stored session.
pub fn resolve_auth(config: &ClientConfig, store: &SessionStore) -> Result<Auth> {
    if let Some(token) = config.token() {
        return Ok(Auth::bearer(token));
    }
    Ok(store
        .load()?
        .map(|session| Auth::bearer(session.token))
        .unwrap_or_default())
}

/// Session store plus a client carrying the resolved credential.
/// Only commands that talk to the API call this.
pub fn connect(config: &ClientConfig) -> Result<(SessionStore, ApiClient)> {
    let store = SessionStore::from_config(config)?;
    let auth = resolve_auth(config, &store)?;
    let client = ApiClient::from_config(config, auth).context("Failed to create API client")?;
    Ok((store, client))
}

pub async fn open_file(path: &Path, content_type: Option<String>) -> Result<VideoFile> {
    let file = VideoFile::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(match content_type {
        Some(content_type) => file.with_content_type(content_type),
        None => file,
    })
}

/// Local upload check. Needs no session or network.
pub async fn check_file(path: &Path, content_type: Option<String>) -> Result<FileValidation> {
    let file = open_file(path, content_type).await?;
    Ok(FileValidation::from(file.validate()))
}

/// Parse a video status given on the command line, case-insensitively.
pub fn parse_status(input: &str) -> Result<VideoStatus, String> {
    let status: VideoStatus =
        serde_json::from_value(serde_json::Value::String(input.trim().to_uppercase()))
            .map_err(|e| e.to_string())?;
    match status {
        VideoStatus::Unknown => Err(format!(
            "Unknown status: {} (expected PENDING, PROCESSING, READY or FAILED)",
            input
        )),
        known => Ok(known),
    }
}
