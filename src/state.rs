use crate::auth::repo::{AuthRepo, PgAuthRepo};
use crate::chats::repo::{ChatRepo, PgChatRepo};
use crate::config::AppConfig;
use crate::mail::{LogMailer, Mailer, SmtpMailer};
use crate::profiles::repo::{PgProfileRepo, ProfileRepo};
use crate::tax::{HttpTaxService, TaxService};
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn AuthRepo>,
    pub chats: Arc<dyn ChatRepo>,
    pub profiles: Arc<dyn ProfileRepo>,
    pub tax: Arc<dyn TaxService>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Connects to the database, applies migrations and wires the real collaborators.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        let tax = Arc::new(HttpTaxService::new(
            &config.service.base_url,
            &config.service.api_key,
        )?) as Arc<dyn TaxService>;

        let mailer = match &config.email.server {
            Some(server) => Arc::new(SmtpMailer::new(server, &config.email.from)?) as Arc<dyn Mailer>,
            None => {
                tracing::warn!("EMAIL_SERVER not set; login links will only be logged");
                Arc::new(LogMailer) as Arc<dyn Mailer>
            }
        };

        Ok(Self::from_parts(db, config, tax, mailer))
    }

    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        tax: Arc<dyn TaxService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            config,
            auth: Arc::new(PgAuthRepo::new(db.clone())),
            chats: Arc::new(PgChatRepo::new(db.clone())),
            profiles: Arc::new(PgProfileRepo::new(db)),
            tax,
            mailer,
        }
    }
}
