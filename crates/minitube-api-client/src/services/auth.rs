use crate::{ApiClient, Auth};
use anyhow::{Context, Result};
use minitube_core::models::{Credentials, Session};
use reqwest::Method;
use validator::Validate;

impl ApiClient {
    /// Register a new account. Does not log in.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        let body = credentials(username, password)?;
        self.execute_json(Method::POST, "/auth/register", &body)
            .await
    }

    /// Log in and return the session. The caller decides where to keep the token;
    /// use [`ApiClient::with_session`] to get an authenticated client.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let body = credentials(username, password)?;
        let session: Session = self.post_json("/auth/login", &body).await?;
        tracing::info!(username = %session.username, role = %session.role, "Logged in");
        Ok(session)
    }

    /// Client authenticated as `session`
    pub fn with_session(&self, session: &Session) -> Self {
        self.with_auth(Auth::bearer(session.token.clone()))
    }
}

fn credentials(username: &str, password: &str) -> Result<Credentials> {
    let body = Credentials {
        username: username.trim().to_string(),
        password: password.to_string(),
    };
    body.validate().context("Invalid credentials")?;
    Ok(body)
}
