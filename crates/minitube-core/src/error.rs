//! Error types module
//!
//! `UploadError` is the closed taxonomy surfaced by the upload flow. Local
//! validation failures never touch the network; grant failures come from the
//! metadata API; transfer failures come from the object storage endpoint.
//!
//! Errors self-describe how they should be reported through `ErrorMetadata`.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error reporting - defines how an error should be presented to a user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "FileTooLarge")
    fn error_code(&self) -> &'static str;

    /// Whether restarting the whole flow may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// Human-readable message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Unsupported video format: {content_type}")]
    UnsupportedFormat { content_type: String },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Invalid upload request: {0}")]
    InvalidRequest(String),

    #[error("Upload grant denied{}: {message}", status_suffix(.status))]
    GrantDenied {
        status: Option<u16>,
        message: String,
    },

    #[error("Upload grant missing: {0}")]
    GrantMissing(String),

    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    #[error("Transfer aborted")]
    TransferAborted,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn upload_error_static_metadata(
    err: &UploadError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        UploadError::UnsupportedFormat { .. } => (
            "UnsupportedFormat",
            false,
            Some("Use an MP4, MPEG, MOV or AVI file"),
            LogLevel::Debug,
        ),
        UploadError::FileTooLarge { .. } => (
            "FileTooLarge",
            false,
            Some("Choose a file of at most 5 GiB"),
            LogLevel::Debug,
        ),
        UploadError::InvalidRequest(_) => (
            "InvalidRequest",
            false,
            Some("Check the title and description and try again"),
            LogLevel::Debug,
        ),
        UploadError::GrantDenied { status, .. } => (
            "GrantDenied",
            // Transport failures and server errors may succeed on a fresh attempt
            !matches!(status, Some(400..=499)),
            Some("Check that you are logged in and the metadata is accepted"),
            LogLevel::Warn,
        ),
        UploadError::GrantMissing(_) => (
            "GrantMissing",
            true,
            Some("Retry the upload; contact support if this persists"),
            LogLevel::Error,
        ),
        UploadError::TransferFailed(_) => (
            "TransferFailed",
            true,
            Some("Retry the upload from the beginning"),
            LogLevel::Error,
        ),
        UploadError::TransferAborted => (
            "TransferAborted",
            true,
            Some("Start the upload again when ready"),
            LogLevel::Debug,
        ),
    }
}

impl UploadError {
    /// Whether the failure happened before any network call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            UploadError::UnsupportedFormat { .. }
                | UploadError::FileTooLarge { .. }
                | UploadError::InvalidRequest(_)
        )
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        upload_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::UnsupportedFormat { .. } => {
                "Unsupported video format. Please use MP4, MOV or AVI.".to_string()
            }
            UploadError::FileTooLarge { .. } => {
                "File is too large. The maximum size is 5GB.".to_string()
            }
            UploadError::InvalidRequest(ref msg) => msg.clone(),
            UploadError::GrantDenied { ref message, .. } => message.clone(),
            UploadError::GrantMissing(_) => {
                "The server did not return an upload URL".to_string()
            }
            UploadError::TransferFailed(_) => "Failed to upload the file to storage".to_string(),
            UploadError::TransferAborted => "Upload cancelled".to_string(),
        }
    }
}
