use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, preferences::voices, state::AppState};

use super::dto::SpeechRequest;
use super::repo::GeneratedSpeech;
use super::services::{self, PipelineError, SpeakerProfile};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/speeches", get(list_my_speeches))
        .route("/speeches/public", get(list_public_speeches))
        .route("/speeches/public/:id", get(get_public_speech))
        .route("/speeches/:id", get(get_my_speech))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/speeches", post(generate_speech))
        .route("/speeches/public", post(generate_public_speech))
}

#[instrument(skip(state, payload))]
pub async fn generate_speech(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SpeechRequest>,
) -> Result<(StatusCode, Json<GeneratedSpeech>), (StatusCode, String)> {
    run_on_demand(&state, Some(user_id), payload).await
}

/// Anonymous generation; the record is persisted with no owner.
#[instrument(skip(state, payload))]
pub async fn generate_public_speech(
    State(state): State<AppState>,
    Json(payload): Json<SpeechRequest>,
) -> Result<(StatusCode, Json<GeneratedSpeech>), (StatusCode, String)> {
    run_on_demand(&state, None, payload).await
}

async fn run_on_demand(
    state: &AppState,
    owner: Option<Uuid>,
    payload: SpeechRequest,
) -> Result<(StatusCode, Json<GeneratedSpeech>), (StatusCode, String)> {
    if payload.first_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "first_name is required".into()));
    }
    if !voices::is_known_voice(&payload.voice) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown voice: {}", payload.voice),
        ));
    }

    let profile = SpeakerProfile {
        first_name: payload.first_name.trim(),
        user_profile: payload.user_profile.as_deref(),
        persona: &payload.persona,
        tone: &payload.tone,
        voice: &payload.voice,
    };

    match services::generate_and_store(state, owner, &profile).await {
        Ok((record, _artifact)) => Ok((StatusCode::CREATED, Json(record))),
        Err(e) => {
            error!(error = %e, stage = e.stage(), owner = ?owner, "on-demand generation failed");
            Err(pipeline_status(&e))
        }
    }
}

fn pipeline_status(e: &PipelineError) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Speech {} failed", e.stage()),
    )
}

#[instrument(skip(state))]
pub async fn list_my_speeches(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<GeneratedSpeech>>, (StatusCode, String)> {
    let speeches = GeneratedSpeech::list_for_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(speeches))
}

#[instrument(skip(state))]
pub async fn get_my_speech(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedSpeech>, (StatusCode, String)> {
    let speech = GeneratedSpeech::get_for_user(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Speech not found".to_string()))?;
    Ok(Json(speech))
}

#[instrument(skip(state))]
pub async fn list_public_speeches(
    State(state): State<AppState>,
) -> Result<Json<Vec<GeneratedSpeech>>, (StatusCode, String)> {
    let speeches = GeneratedSpeech::list_public(&state.db)
        .await
        .map_err(internal)?;
    Ok(Json(speeches))
}

#[instrument(skip(state))]
pub async fn get_public_speech(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedSpeech>, (StatusCode, String)> {
    let speech = GeneratedSpeech::get_public(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Public speech not found".to_string()))?;
    Ok(Json(speech))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
