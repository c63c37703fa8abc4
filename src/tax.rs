//! Client for the external tax-answering service.
//!
//! The service has answered in more than one shape over time, so the reply is
//! decoded into [`ReplyBody`] and reduced to a display string by
//! [`TaxReply::answer_text`].

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chats::dto::ChatTurn;

/// Shown when the service replied without any usable text.
pub const FALLBACK_ANSWER: &str = "Geen antwoord";

#[async_trait]
pub trait TaxService: Send + Sync {
    async fn ask(&self, message: &str, history: &[ChatTurn]) -> anyhow::Result<TaxReply>;
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    message: &'a str,
    history: &'a [ChatTurn],
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Segment {
    #[serde(default)]
    pub text: Option<String>,
}

/// The `response` field of a service reply.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReplyBody {
    Segments(Vec<Segment>),
    Text(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TaxReply {
    #[serde(default)]
    pub response: Option<ReplyBody>,
}

impl TaxReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            response: Some(ReplyBody::Text(text.into())),
        }
    }

    /// First segment's text, else the bare string, else [`FALLBACK_ANSWER`]. Empty strings count as missing.
    pub fn answer_text(&self) -> String {
        let text = match &self.response {
            Some(ReplyBody::Segments(segments)) => segments.first().and_then(|s| s.text.as_deref()),
            Some(ReplyBody::Text(text)) => Some(text.as_str()),
            Some(ReplyBody::Other(_)) | None => None,
        };
        match text {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => FALLBACK_ANSWER.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HttpTaxService {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpTaxService {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&format!("{}/api/chat", base_url.trim_end_matches('/')))
            .with_context(|| format!("invalid service url {}", base_url))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl TaxService for HttpTaxService {
    async fn ask(&self, message: &str, history: &[ChatTurn]) -> anyhow::Result<TaxReply> {
        let res = self
            .client
            .post(self.endpoint.clone())
            .header("X-API-Key", &self.api_key)
            .json(&AskRequest { message, history })
            .send()
            .await
            .context("send to answering service")?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "answering service returned non-success status");
        }
        // the body is decoded regardless of status; error payloads fall back to the placeholder
        let reply = res
            .json::<TaxReply>()
            .await
            .context("decode answering service reply")?;
        debug!(%status, history_len = history.len(), "answering service replied");
        Ok(reply)
    }
}
