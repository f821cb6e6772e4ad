use serde::{Deserialize, Serialize};
use validator::Validate;

use super::id::ResourceId;
use super::video::Video;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub video_ids: Vec<ResourceId>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

impl Playlist {
    pub fn contains(&self, video_id: &ResourceId) -> bool {
        self.video_ids.contains(video_id) || self.videos.iter().any(|v| &v.id == video_id)
    }
}

/// `{ "data": [...] }` envelope returned by the playlist listing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaylistList {
    #[serde(default)]
    pub data: Vec<Playlist>,
}

/// Body of playlist create and rename
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaylistName {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Playlist name must be between 1 and 200 characters"
    ))]
    pub name: String,
}

impl PlaylistName {
    pub fn new(name: impl Into<String>) -> Self {
        PlaylistName {
            name: name.into().trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideo {
    pub video_id: ResourceId,
}

/// Result of toggling a video's membership in a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistChange {
    Added,
    Removed,
}
