use crate::{segment, ApiClient};
use anyhow::Result;
use minitube_core::models::{Channel, SubscriptionStatus};
use reqwest::Method;

impl ApiClient {
    /// Channel page: videos and server-side totals.
    pub async fn get_channel(&self, username: &str) -> Result<Channel> {
        let mut channel: Channel = self
            .get(&format!("/channels/{}", segment(username)), &[])
            .await?;
        if channel.username.is_none() {
            channel.username = Some(username.to_string());
        }
        Ok(channel)
    }

    /// Whether the current user follows `username`.
    pub async fn subscription_status(&self, username: &str) -> Result<SubscriptionStatus> {
        self.get(&format!("/channels/{}/subscription", segment(username)), &[])
            .await
    }

    pub async fn subscribe(&self, username: &str) -> Result<()> {
        self.execute(Method::POST, &format!("/channels/{}/subscribe", segment(username)))
            .await
    }

    pub async fn unsubscribe(&self, username: &str) -> Result<()> {
        self.execute(
            Method::DELETE,
            &format!("/channels/{}/subscribe", segment(username)),
        )
        .await
    }

    /// Flip the subscription and return the new status.
    pub async fn toggle_subscription(&self, username: &str) -> Result<SubscriptionStatus> {
        let current = self.subscription_status(username).await?;
        if current.subscribed {
            self.unsubscribe(username).await?;
        } else {
            self.subscribe(username).await?;
        }
        Ok(SubscriptionStatus {
            subscribed: !current.subscribed,
        })
    }
}
