use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::comment::Comment;
use super::id::ResourceId;

/// Server-side processing state of an uploaded video
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoStatus {
    #[default]
    Pending,
    Processing,
    Ready,
    Failed,
    #[serde(other)]
    Unknown,
}

impl Display for VideoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            VideoStatus::Pending => "PENDING",
            VideoStatus::Processing => "PROCESSING",
            VideoStatus::Ready => "READY",
            VideoStatus::Failed => "FAILED",
            VideoStatus::Unknown => "UNKNOWN",
        };
        // Honors width and alignment flags
        f.pad(name)
    }
}

/// A like or dislike left by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub username: String,
    pub is_like: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub is_like: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Duration label as registered at upload ("MM:SS" or "H:MM:SS")
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub status: VideoStatus,
    #[serde(default)]
    pub streaming_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Video {
    pub fn like_count(&self) -> usize {
        self.likes.iter().filter(|l| l.is_like).count()
    }

    pub fn dislike_count(&self) -> usize {
        self.likes.iter().filter(|l| !l.is_like).count()
    }

    /// The reaction left by `username`, if any
    pub fn reaction_of(&self, username: &str) -> Option<bool> {
        self.likes
            .iter()
            .find(|l| l.username == username)
            .map(|l| l.is_like)
    }

    pub fn is_playable(&self) -> bool {
        self.status == VideoStatus::Ready && self.streaming_url.is_some()
    }
}
