use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, warn};

/// Delivers login links to users.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_login_link(&self, to: &str, link: &str) -> anyhow::Result<()>;
}

pub const LOGIN_SUBJECT: &str = "Inloggen bij Fiscaal.ai";

pub fn login_body(link: &str) -> String {
    format!(
        "Hallo,\n\nKlik op de onderstaande link om in te loggen bij Fiscaal.ai:\n\n{link}\n\n\
         Heb je deze e-mail niet aangevraagd? Dan kun je hem negeren.\n"
    )
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(server_url: &str, from: &str) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(server_url)
            .context("parse EMAIL_SERVER")?
            .build();
        let from = from.parse::<Mailbox>().context("parse EMAIL_FROM")?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_login_link(&self, to: &str, link: &str) -> anyhow::Result<()> {
        let to = to.parse::<Mailbox>().context("parse recipient")?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(LOGIN_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(login_body(link))
            .context("build login email")?;
        self.transport.send(email).await.context("smtp send")?;
        Ok(())
    }
}

/// Used when no SMTP server is configured: the link only goes to the log.
#[derive(Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_login_link(&self, to: &str, link: &str) -> anyhow::Result<()> {
        warn!("EMAIL_SERVER not set; login link not mailed");
        info!(%to, %link, "login link");
        Ok(())
    }
}
