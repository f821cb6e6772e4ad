//! Admin console endpoints. All require an ADMIN session.

use crate::{segment, ApiClient};
use anyhow::{Context, Result};
use minitube_core::models::{
    AdminUser, MessageResponse, NewUser, ResourceId, Role, RoleUpdate, Video, VideoStatus,
    VideoUpdate,
};

impl ApiClient {
    pub async fn admin_list_users(&self) -> Result<Vec<AdminUser>> {
        self.get("/admin/users", &[]).await
    }

    pub async fn admin_create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<MessageResponse> {
        if username.trim().is_empty() || password.is_empty() {
            anyhow::bail!("Username and password are required");
        }
        let body = NewUser {
            username: username.trim().to_string(),
            password: password.to_string(),
            role,
        };
        self.post_json("/admin/users", &body)
            .await
            .context("Failed to create user")
    }

    pub async fn admin_update_role(&self, user_id: &ResourceId, role: Role) -> Result<MessageResponse> {
        self.put_json(
            &format!("/admin/users/{}/role", segment(user_id)),
            &RoleUpdate { role },
        )
        .await
    }

    pub async fn admin_delete_user(&self, user_id: &ResourceId) -> Result<MessageResponse> {
        self.delete_json(&format!("/admin/users/{}", segment(user_id)))
            .await
    }

    pub async fn admin_list_videos(&self) -> Result<Vec<Video>> {
        self.get("/admin/videos", &[]).await
    }

    pub async fn admin_get_video(&self, id: &ResourceId) -> Result<Video> {
        self.get(&format!("/admin/videos/{}", segment(id)), &[])
            .await
    }

    /// Update title and/or status. Unset fields keep the video's current values.
    pub async fn admin_update_video(
        &self,
        id: &ResourceId,
        title: Option<&str>,
        status: Option<VideoStatus>,
    ) -> Result<MessageResponse> {
        if title.is_none() && status.is_none() {
            anyhow::bail!("Nothing to update: provide a title or a status");
        }
        let current = self.admin_get_video(id).await?;
        let body = VideoUpdate {
            title: title.map(str::to_string).unwrap_or(current.title),
            status: status.unwrap_or(current.status),
        };
        self.put_json(&format!("/admin/videos/{}", segment(id)), &body)
            .await
    }

    pub async fn admin_delete_video(&self, id: &ResourceId) -> Result<MessageResponse> {
        self.delete_json(&format!("/admin/videos/{}", segment(id)))
            .await
    }

    pub async fn admin_delete_comment(&self, comment_id: &ResourceId) -> Result<MessageResponse> {
        self.delete_json(&format!("/admin/comments/{}", segment(comment_id)))
            .await
    }
}
