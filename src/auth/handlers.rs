use axum::{
    extract::{rejection::QueryRejection, FromRef, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{CallbackQuery, PublicUser, SessionResponse, SignInRequest, SignInResponse},
        extractors::AuthUser,
        jwt::JwtKeys,
        services::{consume_login_link, is_valid_email, normalize_email, request_login_link},
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signin/email", post(sign_in))
        .route("/auth/callback/email", get(callback))
        .route("/auth/session", get(get_session))
}

#[instrument(skip(state, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> ApiResult<Json<SignInResponse>> {
    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    request_login_link(&state, &email).await.map_err(|e| {
        error!(error = %e, %email, "issuing login link failed");
        ApiError::Internal(e)
    })?;

    info!(%email, "login link sent");
    Ok(Json(SignInResponse { sent: true }))
}

#[instrument(skip(state, query))]
pub async fn callback(
    State(state): State<AppState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> ApiResult<Json<SessionResponse>> {
    let Query(query) = query.map_err(|e| {
        warn!(error = %e, "malformed login link");
        ApiError::BadRequest("Missing token or email".into())
    })?;
    let email = normalize_email(&query.email);
    let Some(user) = consume_login_link(&state, &email, &query.token).await? else {
        warn!(%email, "invalid, expired or reused login link");
        return Err(ApiError::Unauthorized);
    };

    let keys = JwtKeys::from_ref(&state);
    let session_token = keys.sign_session(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(SessionResponse {
        session_token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<PublicUser>> {
    let user = state.auth.find_user_by_id(user_id).await?.ok_or_else(|| {
        warn!(%user_id, "session for unknown user");
        ApiError::Unauthorized
    })?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
    }))
}
