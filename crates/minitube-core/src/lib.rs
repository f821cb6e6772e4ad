//! Minitube Core Library
//!
//! This crate provides the domain models, error types, configuration, validation
//! and display helpers shared by the Minitube API client and CLI.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError, LogFormat};
pub use error::{ErrorMetadata, LogLevel, UploadError};
pub use validation::{
    content_type_for_path, validate_upload_fields, validate_video_file, FileValidation,
    ALLOWED_VIDEO_CONTENT_TYPES, MAX_VIDEO_SIZE_BYTES,
};
