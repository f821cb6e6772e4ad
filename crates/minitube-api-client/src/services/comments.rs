use crate::{segment, ApiClient};
use anyhow::{Context, Result};
use minitube_core::models::{Comment, NewComment, ResourceId};
use reqwest::Method;
use validator::Validate;

impl ApiClient {
    /// Comments on a video.
    pub async fn list_comments(&self, video_id: &ResourceId) -> Result<Vec<Comment>> {
        self.get(&format!("/videos/{}/comments", segment(video_id)), &[])
            .await
    }

    /// Add a comment. Blank content is rejected without a request.
    pub async fn add_comment(&self, video_id: &ResourceId, content: &str) -> Result<()> {
        let body = NewComment::new(content);
        body.validate().context("Invalid comment")?;
        let path = format!("/videos/{}/comments", segment(video_id));
        self.execute_json(Method::POST, &path, &body).await
    }

    /// Delete a comment (author or admin).
    pub async fn delete_comment(&self, comment_id: &ResourceId) -> Result<()> {
        self.delete(&format!("/comments/{}", segment(comment_id)))
            .await
    }
}
