use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, info};

use super::hashing::{generate_login_token, hash_token};
use super::repo_types::User;
use crate::state::AppState;

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn login_link(base_url: &str, token: &str, email: &str) -> anyhow::Result<String> {
    let url = Url::parse_with_params(
        &format!("{}/api/auth/callback/email", base_url.trim_end_matches('/')),
        &[("token", token), ("email", email)],
    )
    .context("build login link")?;
    Ok(url.to_string())
}

/// Stores a fresh single-use token for `email` and mails the link. Earlier
/// links for the same address stop working. `email` must be normalised.
pub async fn request_login_link(st: &AppState, email: &str) -> anyhow::Result<()> {
    let now = OffsetDateTime::now_utc();
    purge_expired(st, now).await?;

    let token = generate_login_token();
    let token_hash = hash_token(&st.config.jwt.secret, &token)?;
    let expires_at = now + TimeDuration::minutes(st.config.email.login_link_ttl_minutes);

    st.auth
        .replace_login_token(email, &token_hash, expires_at)
        .await?;

    let link = login_link(&st.config.base_url, &token, email)?;
    st.mailer
        .send_login_link(email, &link)
        .await
        .with_context(|| format!("send login link to {}", email))?;
    debug!(%email, "login link issued");
    Ok(())
}

/// Consumes a login link. Returns `None` when the token is unknown, expired or already used.
pub async fn consume_login_link(st: &AppState, email: &str, token: &str) -> anyhow::Result<Option<User>> {
    let now = OffsetDateTime::now_utc();
    let token_hash = hash_token(&st.config.jwt.secret, token)?;

    let taken = st.auth.take_login_token(email, &token_hash, now).await?;
    purge_expired(st, now).await?;
    if taken.is_none() {
        return Ok(None);
    }

    let (user, created) = st.auth.find_or_create_user(email).await?;
    if created {
        info!(user_id = %user.id, email = %user.email, "user created");
    }
    Ok(Some(user))
}

async fn purge_expired(st: &AppState, now: OffsetDateTime) -> anyhow::Result<()> {
    let purged = st.auth.purge_expired_login_tokens(now).await?;
    if purged > 0 {
        debug!(purged, "expired login tokens removed");
    }
    Ok(())
}
