use crate::{segment, ApiClient};
use anyhow::Result;
use minitube_core::models::{Like, LikeRequest, ResourceId, Video};
use reqwest::Method;

impl ApiClient {
    /// List all videos.
    pub async fn list_videos(&self) -> Result<Vec<Video>> {
        self.get("/videos", &[]).await
    }

    /// Get a single video with its likes and comments.
    pub async fn get_video(&self, id: &ResourceId) -> Result<Video> {
        self.get(&format!("/videos/{}", segment(id)), &[]).await
    }

    /// Count a view. Failures are logged and ignored.
    pub async fn increase_view(&self, id: &ResourceId) {
        if let Err(e) = self
            .execute(Method::PUT, &format!("/videos/{}/view", segment(id)))
            .await
        {
            tracing::debug!(video_id = %id, error = %e, "View increment failed");
        }
    }

    /// Delete a video (uploader or admin).
    pub async fn delete_video(&self, id: &ResourceId) -> Result<()> {
        self.delete(&format!("/videos/{}", segment(id))).await
    }

    /// Like (`true`) or dislike (`false`) a video; repeating the same reaction toggles it off.
    pub async fn toggle_like(&self, id: &ResourceId, is_like: bool) -> Result<()> {
        let path = format!("/videos/{}/likes", segment(id));
        self.execute_json(Method::POST, &path, &LikeRequest { is_like })
            .await
    }

    /// Likes and dislikes left on a video.
    pub async fn get_likes(&self, id: &ResourceId) -> Result<Vec<Like>> {
        self.get(&format!("/videos/{}/likes", segment(id)), &[])
            .await
    }
}
