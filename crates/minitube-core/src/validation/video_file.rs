//! Client-side checks run before any network call of an upload.

use serde::Serialize;
use std::path::Path;
use validator::Validate;

use crate::error::{ErrorMetadata, UploadError};
use crate::models::UploadGrantRequest;

/// Container types accepted for upload
pub const ALLOWED_VIDEO_CONTENT_TYPES: [&str; 4] = [
    "video/mp4",
    "video/mpeg",
    "video/quicktime",
    "video/x-msvideo",
];

/// 5 GiB
pub const MAX_VIDEO_SIZE_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Validate a file's declared media type and size. Pure; no I/O.
pub fn validate_video_file(content_type: &str, size: u64) -> Result<(), UploadError> {
    let normalized = content_type.trim().to_lowercase();
    // Parameters such as "; codecs=..." do not change the container
    let essence = normalized.split(';').next().unwrap_or_default().trim();

    if !ALLOWED_VIDEO_CONTENT_TYPES.contains(&essence) {
        return Err(UploadError::UnsupportedFormat {
            content_type: content_type.to_string(),
        });
    }

    if size > MAX_VIDEO_SIZE_BYTES {
        return Err(UploadError::FileTooLarge {
            size,
            max: MAX_VIDEO_SIZE_BYTES,
        });
    }

    Ok(())
}

/// Media type implied by a file's extension, if it is a known video container.
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "mp4" | "m4v" => Some("video/mp4"),
        "mpeg" | "mpg" | "mpe" => Some("video/mpeg"),
        "mov" | "qt" => Some("video/quicktime"),
        "avi" => Some("video/x-msvideo"),
        "webm" => Some("video/webm"),
        "mkv" => Some("video/x-matroska"),
        _ => None,
    }
}

/// Check title and description and build the grant request body.
///
/// The title is trimmed; a missing description is sent as an empty string.
pub fn validate_upload_fields(
    title: &str,
    description: Option<&str>,
    duration: &str,
) -> Result<UploadGrantRequest, UploadError> {
    let request = UploadGrantRequest {
        title: title.trim().to_string(),
        duration: duration.to_string(),
        description: description.unwrap_or_default().to_string(),
    };

    request.validate().map_err(|errors| {
        let messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        UploadError::InvalidRequest(messages.join("; "))
    })?;

    Ok(request)
}

/// Serializable outcome of a file check: `{ "valid": false, "error": "FileTooLarge", ... }`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileValidation {
    pub fn check(content_type: &str, size: u64) -> Self {
        validate_video_file(content_type, size).into()
    }
}

impl From<Result<(), UploadError>> for FileValidation {
    fn from(result: Result<(), UploadError>) -> Self {
        match result {
            Ok(()) => FileValidation {
                valid: true,
                error: None,
                message: None,
            },
            Err(err) => FileValidation {
                valid: false,
                error: Some(err.error_code()),
                message: Some(err.client_message()),
            },
        }
    }
}
