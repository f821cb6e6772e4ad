use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::id::ResourceId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: ResourceId,
    pub username: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /videos/{id}/comments`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Comment must be between 1 and 5000 characters"
    ))]
    pub content: String,
}

impl NewComment {
    pub fn new(content: impl Into<String>) -> Self {
        NewComment {
            content: content.into().trim().to_string(),
        }
    }
}
