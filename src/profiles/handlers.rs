use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use super::dto::{Profile, SaveProfileResponse};
use crate::{auth::extractors::AuthUser, error::ApiResult, state::AppState};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).post(save_profile))
}

/// Stored profile, or the all-empty default when the user never saved one.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Profile>> {
    let profile = state.profiles.find(user_id).await?.unwrap_or_default();
    Ok(Json(profile))
}

#[instrument(skip(state, profile))]
pub async fn save_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(profile): Json<Profile>,
) -> ApiResult<Json<SaveProfileResponse>> {
    state.profiles.upsert(user_id, &profile).await?;
    info!(%user_id, "profile saved");
    Ok(Json(SaveProfileResponse { success: true }))
}
