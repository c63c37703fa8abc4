use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{ChatDetails, ChatListItem, ChatRequest, ChatResponse, Pagination};
use super::services::answer_and_record;
use crate::{
    auth::extractors::{AuthUser, MaybeAuthUser},
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(post_chat))
        .route("/chats", get(list_chats))
        .route("/chats/:id", get(get_chat))
}

#[instrument(skip(state, req))]
pub async fn post_chat(
    State(state): State<AppState>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let res = answer_and_record(&state, user_id, req).await?;
    Ok(Json(res))
}

#[instrument(skip(state))]
pub async fn list_chats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<ChatListItem>>> {
    let (limit, offset) = p.clamped();
    let chats = state.chats.list_by_user(user_id, limit, offset).await?;
    let items = chats
        .into_iter()
        .map(|c| ChatListItem {
            id: c.id,
            title: c.title,
            created_at: c.created_at,
            updated_at: c.updated_at,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ChatDetails>> {
    let chat = state
        .chats
        .get(user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Chat"))?;
    Ok(Json(ChatDetails {
        id: chat.id,
        title: chat.title,
        messages: chat.messages.0,
        created_at: chat.created_at,
        updated_at: chat.updated_at,
    }))
}
