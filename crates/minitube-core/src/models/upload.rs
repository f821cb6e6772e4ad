use serde::{Deserialize, Serialize};
use validator::Validate;

use super::id::ResourceId;

/// Body of `POST /videos/upload-request`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadGrantRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,
    /// Duration label, "MM:SS" or "H:MM:SS"
    pub duration: String,
    #[validate(length(
        max = 5000,
        message = "Description must be at most 5000 characters"
    ))]
    pub description: String,
}

/// Response of `POST /videos/upload-request`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrantResponse {
    /// Pre-authorized, time-limited destination for the file body
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub video_id: Option<ResourceId>,
}
