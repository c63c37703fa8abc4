use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{LoginToken, User};

#[async_trait]
pub trait AuthRepo: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Returns the user for `email`, creating it on first sign-in. The flag is true when created.
    async fn find_or_create_user(&self, email: &str) -> anyhow::Result<(User, bool)>;

    /// Stores a login token for `email`, dropping any earlier ones for that address.
    async fn replace_login_token(
        &self,
        email: &str,
        token_hash: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()>;

    /// Deletes and returns the matching unexpired token. `None` if unknown,
    /// expired or already consumed.
    async fn take_login_token(
        &self,
        email: &str,
        token_hash: &str,
        now: OffsetDateTime,
    ) -> anyhow::Result<Option<LoginToken>>;

    async fn purge_expired_login_tokens(&self, now: OffsetDateTime) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgAuthRepo {
    db: PgPool,
}

impl PgAuthRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthRepo for PgAuthRepo {
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn find_or_create_user(&self, email: &str) -> anyhow::Result<(User, bool)> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email)
            VALUES ($1)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, created_at
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("insert user")?;

        if let Some(user) = created {
            return Ok((user, true));
        }

        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, created_at FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
        .context("find user by email")?;
        Ok((user, false))
    }

    async fn replace_login_token(
        &self,
        email: &str,
        token_hash: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await.context("begin login token tx")?;
        sqlx::query(r#"DELETE FROM verification_tokens WHERE email = $1"#)
            .bind(email)
            .execute(&mut *tx)
            .await
            .context("drop earlier login tokens")?;
        sqlx::query(
            r#"
            INSERT INTO verification_tokens (email, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(email)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .context("insert login token")?;
        tx.commit().await.context("commit login token tx")?;
        Ok(())
    }

    async fn take_login_token(
        &self,
        email: &str,
        token_hash: &str,
        now: OffsetDateTime,
    ) -> anyhow::Result<Option<LoginToken>> {
        let row = sqlx::query_as::<_, LoginToken>(
            r#"
            DELETE FROM verification_tokens
             WHERE email = $1 AND token_hash = $2 AND expires_at > $3
            RETURNING id, email, token_hash, expires_at
            "#,
        )
        .bind(email)
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.db)
        .await
        .context("take login token")?;
        Ok(row)
    }

    async fn purge_expired_login_tokens(&self, now: OffsetDateTime) -> anyhow::Result<u64> {
        let res = sqlx::query(r#"DELETE FROM verification_tokens WHERE expires_at <= $1"#)
            .bind(now)
            .execute(&self.db)
            .await
            .context("purge expired login tokens")?;
        Ok(res.rows_affected())
    }
}
