use serde::{Deserialize, Serialize};

use super::video::Video;

/// Channel page data. Subscriber counts always come from the server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub video_count: u64,
    #[serde(default)]
    pub subscriber_count: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionStatus {
    pub subscribed: bool,
}
