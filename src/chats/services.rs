use tracing::info;
use uuid::Uuid;

use super::dto::{ChatRequest, ChatResponse, ChatTurn};
use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

const TITLE_MAX_CHARS: usize = 50;

/// Title of a new chat: the first 50 characters of its first message.
pub fn chat_title(message: &str) -> String {
    message.chars().take(TITLE_MAX_CHARS).collect()
}

/// Prior history followed by the new user/assistant pair.
pub fn extend_transcript(history: Vec<ChatTurn>, message: &str, answer: &str) -> Vec<ChatTurn> {
    let mut messages = history;
    messages.reserve(2);
    messages.push(ChatTurn::user(message));
    messages.push(ChatTurn::assistant(answer));
    messages
}

/// Ask the answering service and, for signed-in users, persist the new turn.
pub async fn answer_and_record(
    st: &AppState,
    user_id: Option<Uuid>,
    req: ChatRequest,
) -> ApiResult<ChatResponse> {
    let reply = st
        .tax
        .ask(&req.message, &req.history)
        .await
        .map_err(ApiError::Upstream)?;
    let response = reply.answer_text();

    let Some(user_id) = user_id else {
        return Ok(ChatResponse {
            response,
            chat_id: None,
        });
    };

    let messages = extend_transcript(req.history, &req.message, &response);
    let chat_id = match req.chat_id {
        Some(chat_id) => {
            if !st.chats.replace_messages(user_id, chat_id, &messages).await? {
                return Err(ApiError::NotFound("Chat"));
            }
            chat_id
        }
        None => {
            let chat = st
                .chats
                .create(user_id, &chat_title(&req.message), &messages)
                .await?;
            info!(%user_id, chat_id = %chat.id, "chat created");
            chat.id
        }
    };

    Ok(ChatResponse {
        response,
        chat_id: Some(chat_id),
    })
}
