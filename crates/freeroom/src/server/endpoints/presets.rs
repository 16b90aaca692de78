use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::server::types::ApiErrorType;
use crate::types::AppState;
use crate::vacancy::preset::{self, BuiltinPreset};
use crate::vacancy::query::QueryConfig;
use crate::vacancy::PresetError;

/// GET /filters
pub async fn get_filters(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /filters");

    let config = s.query.read().await;
    (StatusCode::OK, Json(config.clone())).into_response()
}

/// PUT /filters
/// Replaces the active query configuration.
pub async fn put_filters(
    State(s): State<Arc<AppState>>,
    Json(config): Json<QueryConfig>,
) -> Response {
    info!("PUT /filters");

    *s.query.write().await = config.clone();
    (StatusCode::OK, Json(config)).into_response()
}

/// GET /presets
pub async fn get_presets(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /presets");

    let user_config = s.user_config.read().await;
    (StatusCode::OK, Json(user_config.clone())).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SavePresetRequest {
    pub name: String,
}

/// POST /presets
/// Captures the current filter/sort configuration under the given name.
pub async fn post_save_preset(
    State(s): State<Arc<AppState>>,
    Json(req): Json<SavePresetRequest>,
) -> Response {
    info!("POST /presets ({})", req.name);

    if req.name.trim().is_empty() {
        return ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "Preset name must not be empty",
            None,
        ))
        .into_response();
    }

    let query = s.query.read().await.clone();
    let mut user_config = s.user_config.write().await;
    if let Err(e) = preset::save_preset(&mut user_config, &req.name, &query) {
        return preset_error_response(e);
    }
    if let Err(e) = s.config_db.save_user_config(&user_config) {
        return ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to persist user config",
            Some(e.to_string()),
        ))
        .into_response();
    }

    (StatusCode::OK, Json(json!({"saved": req.name}))).into_response()
}

/// POST /presets/:name/load
/// Loads a saved preset into the active configuration and records it as
/// last used.
pub async fn post_load_preset(
    State(s): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    info!("POST /presets/{}/load", name);

    let mut user_config = s.user_config.write().await;
    let query = match preset::load_preset(&mut user_config, &name) {
        Ok(query) => query,
        Err(e) => return preset_error_response(e),
    };
    if let Err(e) = s.config_db.save_user_config(&user_config) {
        return ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to persist user config",
            Some(e.to_string()),
        ))
        .into_response();
    }
    drop(user_config);

    *s.query.write().await = query.clone();
    (StatusCode::OK, Json(query)).into_response()
}

/// DELETE /presets/:name
pub async fn delete_preset(State(s): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    info!("DELETE /presets/{}", name);

    let mut user_config = s.user_config.write().await;
    if let Err(e) = preset::delete_preset(&mut user_config, &name) {
        return preset_error_response(e);
    }
    if let Err(e) = s.config_db.save_user_config(&user_config) {
        return ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to persist user config",
            Some(e.to_string()),
        ))
        .into_response();
    }

    (StatusCode::OK, Json(json!({"deleted": name}))).into_response()
}

/// DELETE /presets
/// Empties the preset list unconditionally.
pub async fn delete_all_presets(State(s): State<Arc<AppState>>) -> Response {
    info!("DELETE /presets");

    let mut user_config = s.user_config.write().await;
    preset::clear_presets(&mut user_config);
    if let Err(e) = s.config_db.save_user_config(&user_config) {
        return ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to persist user config",
            Some(e.to_string()),
        ))
        .into_response();
    }

    (StatusCode::OK, Json(json!({"presets": []}))).into_response()
}

/// POST /presets/builtin/:token
/// Applies a built-in preset: resets the configuration, then applies the
/// token's overrides.
pub async fn post_apply_builtin(
    State(s): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Response {
    info!("POST /presets/builtin/{}", token);

    let Some(builtin) = BuiltinPreset::parse(&token) else {
        return ApiErrorType::from((
            StatusCode::NOT_FOUND,
            "Unknown built-in preset",
            Some(token),
        ))
        .into_response();
    };

    let snapshot = s.snapshot.read().await;
    let config = builtin.to_config(&snapshot.classrooms);
    drop(snapshot);

    *s.query.write().await = config.clone();
    (StatusCode::OK, Json(config)).into_response()
}

fn preset_error_response(err: PresetError) -> Response {
    let status = match err {
        PresetError::NameCollision { .. } => StatusCode::CONFLICT,
        PresetError::NotFound { .. } => StatusCode::NOT_FOUND,
    };
    ApiErrorType::from((status, "Preset operation failed", Some(err.to_string())))
        .into_response()
}
