use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::server::endpoints::{classrooms, presets, status};
use crate::types::AppState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Snapshot-backed read endpoints plus the refresh/time cursor controls.
    let data_router = Router::new()
        .route("/timetable", get(classrooms::get_timetable))
        .route("/buildings", get(classrooms::get_buildings))
        .route("/classrooms", get(classrooms::get_classrooms))
        .route("/refresh", post(classrooms::post_refresh))
        .route("/time", post(classrooms::post_time));

    // Filter/preset configuration endpoints.
    let config_router = Router::new()
        .route("/filters", get(presets::get_filters).put(presets::put_filters))
        .route(
            "/presets",
            get(presets::get_presets)
                .post(presets::post_save_preset)
                .delete(presets::delete_all_presets),
        )
        .route("/presets/builtin/:token", post(presets::post_apply_builtin))
        .route("/presets/:name/load", post(presets::post_load_preset))
        .route("/presets/:name", delete(presets::delete_preset));

    Router::new()
        .route("/health", get(status::get_health))
        .route("/status", get(status::get_status))
        .merge(data_router)
        .merge(config_router)
        .with_state(app_state)
}
