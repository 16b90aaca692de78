use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::types::AppState;
use crate::vacancy::section;

/// GET /health
pub async fn get_health() -> Response {
    (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
}

/// GET /status
/// Returns the semester/week/section context of the current snapshot.
pub async fn get_status(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /status");

    let snapshot = s.snapshot.read().await;
    let window = section::section_window(snapshot.current_section, &snapshot.timetable);

    let body = json!({
        "semester": {
            "year": snapshot.semester.year,
            "week": snapshot.semester.week,
            "name": snapshot.semester.name,
        },
        "current_time": snapshot.current_time.to_string(),
        "current_section": snapshot.current_section,
        "section_window": window.map(|w| format!("{}-{}", w.start, w.end)),
        "buildings": snapshot.buildings.len(),
        "classrooms": snapshot.classrooms.len(),
        "refreshed_at": snapshot.refreshed_at.map(|t| t.to_rfc3339()),
    });

    (StatusCode::OK, Json(body)).into_response()
}
