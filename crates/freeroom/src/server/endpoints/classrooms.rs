use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::refresh;
use crate::server::types::ApiErrorType;
use crate::types::AppState;
use crate::vacancy::{query, ClockTime};

/// GET /classrooms
/// Returns the classroom set after the active filter/sort configuration.
pub async fn get_classrooms(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /classrooms");

    let snapshot = s.snapshot.read().await;
    let config = s.query.read().await;
    let rooms = query::apply(&snapshot.classrooms, &config);

    (StatusCode::OK, Json(rooms)).into_response()
}

/// GET /buildings
pub async fn get_buildings(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /buildings");

    let snapshot = s.snapshot.read().await;
    (StatusCode::OK, Json(snapshot.buildings.clone())).into_response()
}

/// GET /timetable
pub async fn get_timetable(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /timetable");

    let snapshot = s.snapshot.read().await;
    (StatusCode::OK, Json(snapshot.timetable.clone())).into_response()
}

/// POST /refresh
/// Triggers a full refresh. A refresh already in flight finishes first;
/// this one then runs against the upstream again.
pub async fn post_refresh(State(s): State<Arc<AppState>>) -> Response {
    info!("POST /refresh");

    match refresh::run_refresh(&s).await {
        Ok(()) => {
            let snapshot = s.snapshot.read().await;
            let body = json!({
                "week": snapshot.semester.week,
                "current_section": snapshot.current_section,
                "classrooms": snapshot.classrooms.len(),
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiErrorType::from((
            StatusCode::BAD_GATEWAY,
            "Refresh failed, previous data kept",
            Some(e.to_string()),
        ))
        .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct TimeOverrideRequest {
    /// Wall-clock time as "HH:MM"
    pub time: String,
}

/// POST /time
/// Moves the time cursor without refetching; occupancy is re-evaluated for
/// the overridden time within the same active week.
pub async fn post_time(
    State(s): State<Arc<AppState>>,
    Json(req): Json<TimeOverrideRequest>,
) -> Response {
    info!("POST /time ({})", req.time);

    let Some(instant) = ClockTime::parse(&req.time) else {
        return ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "Expected time as HH:MM",
            Some(req.time),
        ))
        .into_response();
    };

    let (current_section, week) = refresh::apply_time_override(&s, instant).await;
    let body = json!({
        "current_time": instant.to_string(),
        "current_section": current_section,
        "week": week,
    });
    (StatusCode::OK, Json(body)).into_response()
}
