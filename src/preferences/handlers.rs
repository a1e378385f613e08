use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{error, instrument, warn};

use crate::{auth::AuthUser, state::AppState, users::User};

use super::dto::{PreferencesResponse, PreferencesUpdate, VoicesResponse};
use super::repo::Preference;
use super::voices;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/voices", get(list_voices))
        .route("/preferences", get(get_preferences))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/preferences", patch(update_preferences))
}

pub async fn list_voices() -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: voices::VOICES.to_vec(),
    })
}

#[instrument(skip(state))]
pub async fn get_preferences(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PreferencesResponse>, (StatusCode, String)> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    let pref = Preference::find_by_user(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "No preferences set".to_string()))?;

    Ok(Json(PreferencesResponse {
        user_id,
        first_name: user.first_name,
        user_profile: user.user_profile,
        timezone: user.timezone,
        persona: pref.persona,
        tone: pref.tone,
        voice: pref.voice,
    }))
}

/// Updates the profile fields on the user row and upserts the preference
/// row in one request, mirroring the single form the client submits.
#[instrument(skip(state, payload))]
pub async fn update_preferences(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PreferencesUpdate>,
) -> Result<Json<PreferencesResponse>, (StatusCode, String)> {
    if payload.first_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "first_name is required".into()));
    }
    if !voices::is_known_voice(&payload.voice) {
        warn!(user_id = %user_id, voice = %payload.voice, "unknown voice");
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown voice: {}", payload.voice),
        ));
    }

    let user = User::update_profile(
        &state.db,
        user_id,
        payload.first_name.trim(),
        payload.user_profile.as_deref(),
        &payload.timezone,
    )
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "update profile failed");
        internal(e)
    })?;

    let pref = Preference::upsert(
        &state.db,
        user_id,
        &payload.persona,
        &payload.tone,
        &payload.voice,
    )
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "upsert preferences failed");
        internal(e)
    })?;

    Ok(Json(PreferencesResponse {
        user_id,
        first_name: user.first_name,
        user_profile: user.user_profile,
        timezone: user.timezone,
        persona: pref.persona,
        tone: pref.tone,
        voice: pref.voice,
    }))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
