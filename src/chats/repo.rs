use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::dto::ChatTurn;
use super::repo_types::{Chat, ChatSummary};

#[async_trait]
pub trait ChatRepo: Send + Sync {
    async fn create(&self, user_id: Uuid, title: &str, messages: &[ChatTurn]) -> anyhow::Result<Chat>;

    /// Replace the transcript of a chat owned by `user_id`. Returns false when no such chat exists.
    async fn replace_messages(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        messages: &[ChatTurn],
    ) -> anyhow::Result<bool>;

    async fn list_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> anyhow::Result<Vec<ChatSummary>>;

    async fn get(&self, user_id: Uuid, chat_id: Uuid) -> anyhow::Result<Option<Chat>>;
}

#[derive(Clone)]
pub struct PgChatRepo {
    db: PgPool,
}

impl PgChatRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChatRepo for PgChatRepo {
    async fn create(&self, user_id: Uuid, title: &str, messages: &[ChatTurn]) -> anyhow::Result<Chat> {
        let chat = sqlx::query_as::<_, Chat>(
            r#"
            INSERT INTO chats (user_id, title, messages)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, messages, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(Json(messages))
        .fetch_one(&self.db)
        .await
        .context("insert chat")?;
        Ok(chat)
    }

    async fn replace_messages(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        messages: &[ChatTurn],
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE chats
               SET messages = $3, updated_at = now()
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(chat_id)
        .bind(user_id)
        .bind(Json(messages))
        .execute(&self.db)
        .await
        .context("update chat messages")?;
        Ok(res.rows_affected() == 1)
    }

    async fn list_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> anyhow::Result<Vec<ChatSummary>> {
        let rows = sqlx::query_as::<_, ChatSummary>(
            r#"
            SELECT id, title, created_at, updated_at
              FROM chats
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list chats by user")?;
        Ok(rows)
    }

    async fn get(&self, user_id: Uuid, chat_id: Uuid) -> anyhow::Result<Option<Chat>> {
        let chat = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, user_id, title, messages, created_at, updated_at
              FROM chats
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get chat")?;
        Ok(chat)
    }
}
