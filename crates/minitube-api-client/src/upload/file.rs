use bytes::Bytes;
use minitube_core::{content_type_for_path, validate_video_file, UploadError};
use minitube_processing::MediaSource;
use std::path::{Path, PathBuf};

const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// A video chosen for upload: where its bytes are, what it claims to be, and how big it is.
#[derive(Debug, Clone)]
pub struct VideoFile {
    source: MediaSource,
    content_type: String,
    size: u64,
}

impl VideoFile {
    /// Describe a file on disk. The media type comes from the extension.
    pub async fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let content_type = content_type_for_path(&path)
            .unwrap_or(UNKNOWN_CONTENT_TYPE)
            .to_string();

        Ok(Self {
            source: MediaSource::Path(path),
            content_type,
            size: metadata.len(),
        })
    }

    /// In-memory file with an explicit media type.
    pub fn from_bytes(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        let size = data.len() as u64;
        Self {
            source: MediaSource::Memory {
                name: name.into(),
                data,
            },
            content_type: content_type.into(),
            size,
        }
    }

    /// Override the inferred media type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn name(&self) -> String {
        self.source.name()
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            MediaSource::Path(path) => Some(path),
            MediaSource::Memory { .. } => None,
        }
    }

    /// Format and size check. No I/O.
    pub fn validate(&self) -> Result<(), UploadError> {
        validate_video_file(&self.content_type, self.size)
    }
}
