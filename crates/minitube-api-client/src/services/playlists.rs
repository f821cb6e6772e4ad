use crate::{segment, ApiClient};
use anyhow::{Context, Result};
use minitube_core::models::{
    Playlist, PlaylistChange, PlaylistList, PlaylistName, PlaylistVideo, ResourceId,
};
use reqwest::Method;
use validator::Validate;

fn playlist_name(name: &str) -> Result<PlaylistName> {
    let body = PlaylistName::new(name);
    body.validate().context("Invalid playlist name")?;
    Ok(body)
}

impl ApiClient {
    /// Playlists owned by `username`.
    pub async fn user_playlists(&self, username: &str) -> Result<Vec<Playlist>> {
        let list: PlaylistList = self
            .get(&format!("/playlists/user/{}", segment(username)), &[])
            .await?;
        Ok(list.data)
    }

    pub async fn get_playlist(&self, id: &ResourceId) -> Result<Playlist> {
        self.get(&format!("/playlists/{}", segment(id)), &[]).await
    }

    pub async fn create_playlist(&self, name: &str) -> Result<()> {
        let body = playlist_name(name)?;
        self.execute_json(Method::POST, "/playlists", &body).await
    }

    pub async fn rename_playlist(&self, id: &ResourceId, name: &str) -> Result<()> {
        let body = playlist_name(name)?;
        self.execute_json(Method::PUT, &format!("/playlists/{}", segment(id)), &body)
            .await
    }

    pub async fn delete_playlist(&self, id: &ResourceId) -> Result<()> {
        self.delete(&format!("/playlists/{}", segment(id))).await
    }

    pub async fn add_to_playlist(&self, id: &ResourceId, video_id: &ResourceId) -> Result<()> {
        let body = PlaylistVideo {
            video_id: video_id.clone(),
        };
        self.execute_json(
            Method::POST,
            &format!("/playlists/{}/videos", segment(id)),
            &body,
        )
        .await
    }

    pub async fn remove_from_playlist(
        &self,
        id: &ResourceId,
        video_id: &ResourceId,
    ) -> Result<()> {
        self.delete(&format!(
            "/playlists/{}/videos/{}",
            segment(id),
            segment(video_id)
        ))
        .await
    }

    /// Add the video if the playlist lacks it, remove it otherwise.
    pub async fn toggle_video(
        &self,
        playlist: &Playlist,
        video_id: &ResourceId,
    ) -> Result<PlaylistChange> {
        if playlist.contains(video_id) {
            self.remove_from_playlist(&playlist.id, video_id).await?;
            Ok(PlaylistChange::Removed)
        } else {
            self.add_to_playlist(&playlist.id, video_id).await?;
            Ok(PlaylistChange::Added)
        }
    }
}
