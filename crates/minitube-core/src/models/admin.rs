use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ResourceId;
use super::user::Role;
use super::video::VideoStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: ResourceId,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// Admin edit of a video; both fields are always sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoUpdate {
    pub title: String,
    pub status: VideoStatus,
}

/// `{ "message": ... }` acknowledgement returned by admin mutations
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
