use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Who spoke a turn of the transcript.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of a transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    #[serde(default)]
    pub chat_id: Option<Uuid>,
}

/// Reply of `POST /api/chat`. `chat_id` is null for anonymous callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub chat_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatListItem {
    pub id: Uuid,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDetails {
    pub id: Uuid,
    pub title: String,
    pub messages: Vec<ChatTurn>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 { 20 }

pub const MAX_PAGE_SIZE: i64 = 100;

impl Pagination {
    /// `(limit, offset)` brought into the range the database accepts.
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_PAGE_SIZE), self.offset.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_accepts_missing_history_and_chat_id() {
        let req: ChatRequest = serde_json::from_value(json!({ "message": "Hoi" })).unwrap();
        assert_eq!(req.message, "Hoi");
        assert!(req.history.is_empty());
        assert!(req.chat_id.is_none());
    }

    #[test]
    fn request_reads_camel_case_chat_id_and_roles() {
        let id = Uuid::new_v4();
        let req: ChatRequest = serde_json::from_value(json!({
            "message": "En nu?",
            "history": [
                { "role": "user", "content": "Wat is box 3?" },
                { "role": "assistant", "content": "Vermogen." }
            ],
            "chatId": id,
        }))
        .unwrap();
        assert_eq!(req.chat_id, Some(id));
        assert_eq!(req.history[0], ChatTurn::user("Wat is box 3?"));
        assert_eq!(req.history[1].role, Role::Assistant);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let res: Result<ChatTurn, _> =
            serde_json::from_value(json!({ "role": "system", "content": "x" }));
        assert!(res.is_err());
    }

    #[test]
    fn anonymous_response_serializes_null_chat_id() {
        let json = serde_json::to_value(ChatResponse {
            response: "Antwoord".into(),
            chat_id: None,
        })
        .unwrap();
        assert_eq!(json, json!({ "response": "Antwoord", "chatId": null }));
    }

    #[test]
    fn pagination_is_clamped() {
        let p: Pagination = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.clamped(), (20, 0));
        let p = Pagination { limit: -1, offset: -5 };
        assert_eq!(p.clamped(), (1, 0));
        let p = Pagination { limit: 10_000, offset: 40 };
        assert_eq!(p.clamped(), (MAX_PAGE_SIZE, 40));
    }
}
