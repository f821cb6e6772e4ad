//! Shared HTTP client for the Minitube API.
//!
//! Provides a minimal client with an explicit credential, generic JSON helpers,
//! thin service calls (videos, comments, playlists, channels, auth, admin), and
//! the upload coordinator that sends files straight to object storage.

pub mod services;
pub mod upload;

use anyhow::{Context, Result};
use minitube_core::format::error_message;
use minitube_core::ClientConfig;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Credential attached to metadata API requests.
///
/// Owned by the caller; use [`ApiClient::with_auth`] to swap it after login or refresh.
#[derive(Clone, Debug, Default)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    #[default]
    Anonymous,
}

impl Auth {
    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer(token.into())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Auth::Bearer(_))
    }
}

/// Non-success response from the metadata API
#[derive(Debug, Clone, thiserror::Error)]
#[error("API request failed with status {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    /// Consume a non-success response into an error, extracting the server's message.
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason()),
        }
    }
}

/// HTTP client for the Minitube API with an explicit credential.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    /// No overall timeout: transfers of large files may legitimately run for hours
    storage: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: Auth, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        let storage = Client::builder()
            .connect_timeout(timeout)
            .build()
            .context("Failed to create storage HTTP client")?;

        Ok(Self {
            client,
            storage,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create a client from configuration with the given credential.
    pub fn from_config(config: &ClientConfig, auth: Auth) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            auth,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Same client, different credential
    pub fn with_auth(&self, auth: Auth) -> Self {
        Self {
            client: self.client.clone(),
            storage: self.storage.clone(),
            base_url: self.base_url.clone(),
            auth,
        }
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.bearer_auth(token),
            Auth::Anonymous => request,
        }
    }

    /// Authenticated request builder for `path` on the metadata API.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.build_url(path);
        self.apply_auth(self.client.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.context("Failed to send request")?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await.into());
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;
        Ok(body)
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send_json(request).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(self.request(Method::POST, path).json(body))
            .await
    }

    /// PUT JSON body and deserialize response.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(self.request(Method::PUT, path).json(body))
            .await
    }

    /// Request whose response body is irrelevant. Returns Ok(()) on success.
    pub async fn execute(&self, method: Method, path: &str) -> Result<()> {
        self.send(self.request(method, path)).await?;
        Ok(())
    }

    /// Request with a JSON body whose response body is irrelevant.
    pub async fn execute_json<B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        self.send(self.request(method, path).json(body)).await?;
        Ok(())
    }

    /// DELETE request that returns a JSON acknowledgement.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(self.request(Method::DELETE, path)).await
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path).await
    }

    /// Client for direct object storage transfers. Never carries the API credential.
    pub fn storage_client(&self) -> &Client {
        &self.storage
    }
}

/// Percent-encode a value for use as a single path segment.
pub(crate) fn segment(value: impl std::fmt::Display) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}

// Re-export domain types for convenience.
pub use minitube_core::models::{
    AdminUser, Channel, Comment, Like, MessageResponse, Playlist, PlaylistChange, ResourceId,
    Role, Session, SubscriptionStatus, Video, VideoStatus,
};
pub use upload::{
    UploadCoordinator, UploadGrant, UploadOutcome, UploadProgress, UploadReceipt, UploadRequest,
    UploadSession, UploadState, VideoFile,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            ApiClient::new("http://localhost:3000/", Auth::Anonymous, Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.build_url("/videos"), "http://localhost:3000/videos");
    }

    #[test]
    fn test_with_auth_swaps_credential() {
        let client =
            ApiClient::new("http://localhost:3000", Auth::Anonymous, Duration::from_secs(5))
                .unwrap();
        assert!(!client.auth().is_authenticated());

        let authed = client.with_auth(Auth::bearer("jwt"));
        assert!(authed.auth().is_authenticated());
        assert!(!client.auth().is_authenticated());
        assert_eq!(authed.base_url(), client.base_url());
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("alice smith"), "alice%20smith");
        assert_eq!(segment(ResourceId::from(12)), "12");
    }
}
