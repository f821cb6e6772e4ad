//! Validation modules

pub mod video_file;

pub use video_file::{
    content_type_for_path, validate_upload_fields, validate_video_file, FileValidation,
    ALLOWED_VIDEO_CONTENT_TYPES, MAX_VIDEO_SIZE_BYTES,
};
