//! Client side of Fiscaal: an HTTP client for the API plus the chat widget
//! and profile form state machines that drive it.

mod chat;
mod profile_form;

pub use chat::{ChatWidget, EMPTY_TRANSCRIPT_HINT, FAILURE_REPLY, INPUT_PLACEHOLDER, LOGIN_HINT, THINKING};
pub use profile_form::{ProfileForm, SaveState, SAVED_CONFIRMATION};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use tracing::debug;

use crate::auth::dto::{PublicUser, SessionResponse};
use crate::chats::dto::{ChatRequest, ChatResponse};
use crate::profiles::dto::Profile;

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_chat(&self, req: &ChatRequest) -> anyhow::Result<ChatResponse>;
}

#[async_trait]
pub trait ProfileTransport: Send + Sync {
    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()>;
}

/// Talks to a Fiscaal server, optionally with a session token.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token: None,
        }
    }

    pub fn with_session(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_token.is_some()
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Drops the session token. Sessions are stateless, so nothing is sent.
    pub fn sign_out(&mut self) {
        if self.session_token.take().is_some() {
            debug!("signed out");
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Asks the server to mail a login link to `email`.
    pub async fn request_login_link(&self, email: &str) -> anyhow::Result<()> {
        self.http
            .post(self.url("/api/auth/signin/email"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .context("request login link")?
            .error_for_status()?;
        Ok(())
    }

    /// Consumes a login link and keeps the returned session token.
    pub async fn complete_login(&mut self, token: &str, email: &str) -> anyhow::Result<PublicUser> {
        let body: SessionResponse = self
            .http
            .get(self.url("/api/auth/callback/email"))
            .query(&[("token", token), ("email", email)])
            .send()
            .await
            .context("consume login link")?
            .error_for_status()?
            .json()
            .await?;
        debug!(user_id = %body.user.id, "signed in");
        self.session_token = Some(body.session_token);
        Ok(body.user)
    }

    pub async fn load_profile(&self) -> anyhow::Result<Profile> {
        let profile = self
            .authorized(self.http.get(self.url("/api/profile")))
            .send()
            .await
            .context("load profile")?
            .error_for_status()?
            .json()
            .await?;
        Ok(profile)
    }
}

#[async_trait]
impl ChatTransport for ApiClient {
    async fn send_chat(&self, req: &ChatRequest) -> anyhow::Result<ChatResponse> {
        let res = self
            .authorized(self.http.post(self.url("/api/chat")))
            .json(req)
            .send()
            .await
            .context("send chat message")?
            .error_for_status()?
            .json()
            .await?;
        Ok(res)
    }
}

#[async_trait]
impl ProfileTransport for ApiClient {
    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        self.authorized(self.http.post(self.url("/api/profile")))
            .json(profile)
            .send()
            .await
            .context("save profile")?
            .error_for_status()?;
        Ok(())
    }
}
