use minitube_core::format::error_message;
use minitube_core::models::{ResourceId, UploadGrantRequest, UploadGrantResponse};
use minitube_core::UploadError;
use reqwest::Method;

use crate::ApiClient;

const UPLOAD_REQUEST_PATH: &str = "/videos/upload-request";

/// Single-use authorization to write one file to object storage.
///
/// Not `Clone`: a transfer consumes it.
#[derive(Debug)]
pub struct UploadGrant {
    destination_url: String,
    video_id: Option<ResourceId>,
}

impl UploadGrant {
    pub fn destination_url(&self) -> &str {
        &self.destination_url
    }

    pub fn video_id(&self) -> Option<&ResourceId> {
        self.video_id.as_ref()
    }

    pub(crate) fn into_parts(self) -> (String, Option<ResourceId>) {
        (self.destination_url, self.video_id)
    }
}

fn usable_url(url: Option<String>) -> Result<String, UploadError> {
    let url = url.map(|u| u.trim().to_string()).unwrap_or_default();
    if url.is_empty() {
        return Err(UploadError::GrantMissing(
            "response contained no uploadUrl".to_string(),
        ));
    }
    if reqwest::Url::parse(&url)
        .map(|u| !matches!(u.scheme(), "http" | "https"))
        .unwrap_or(true)
    {
        return Err(UploadError::GrantMissing(format!(
            "uploadUrl is not an absolute http(s) URL: {}",
            url
        )));
    }
    Ok(url)
}

impl ApiClient {
    /// Register the video's metadata and obtain a destination for its bytes.
    ///
    /// Not retried: every call creates a new server-side record.
    pub async fn request_grant(
        &self,
        request: &UploadGrantRequest,
    ) -> Result<UploadGrant, UploadError> {
        let response = self
            .request(Method::POST, UPLOAD_REQUEST_PATH)
            .json(request)
            .send()
            .await
            .map_err(|e| UploadError::GrantDenied {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::GrantDenied {
                status: Some(status.as_u16()),
                message: error_message(&body, status.canonical_reason()),
            });
        }

        let grant: UploadGrantResponse = response.json().await.map_err(|e| {
            UploadError::GrantMissing(format!("unreadable grant response: {}", e))
        })?;

        let destination_url = usable_url(grant.upload_url)?;
        tracing::info!(video_id = ?grant.video_id, "Upload grant received");

        Ok(UploadGrant {
            destination_url,
            video_id: grant.video_id,
        })
    }
}
