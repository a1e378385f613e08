use std::collections::HashSet;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::Time;
use tracing::{error, info, instrument};

use crate::{auth::AuthUser, state::AppState};

use super::dto::{parse_time_of_day, ScheduleEntry, ScheduleResponse};
use super::repo::Schedule;
use super::DAY_NAMES;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/schedule", get(get_schedule))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/schedule", post(set_schedule))
}

#[instrument(skip(state))]
pub async fn get_schedule(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ScheduleResponse>>, (StatusCode, String)> {
    let schedules = Schedule::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

/// Replaces the caller's schedule wholesale with the submitted entries.
#[instrument(skip(state, payload))]
pub async fn set_schedule(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<Vec<ScheduleEntry>>,
) -> Result<(StatusCode, Json<Vec<ScheduleResponse>>), (StatusCode, String)> {
    let mut entries: Vec<(String, Time)> = Vec::with_capacity(payload.len());
    let mut seen_days = HashSet::new();

    for entry in &payload {
        if !DAY_NAMES.contains(&entry.day_of_week.as_str()) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Invalid day_of_week: {}", entry.day_of_week),
            ));
        }
        if !seen_days.insert(entry.day_of_week.as_str()) {
            return Err((
                StatusCode::BAD_REQUEST,
                "Duplicate days in schedule".into(),
            ));
        }
        let at = parse_time_of_day(&entry.time_of_day).ok_or((
            StatusCode::BAD_REQUEST,
            format!("Invalid time_of_day: {}", entry.time_of_day),
        ))?;
        entries.push((entry.day_of_week.clone(), at));
    }

    let created = Schedule::replace_for_user(&state.db, user_id, &entries)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "replace schedule failed");
            internal(e)
        })?;

    info!(user_id = %user_id, entries = created.len(), "schedule updated");
    Ok((
        StatusCode::CREATED,
        Json(created.into_iter().map(Into::into).collect()),
    ))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
