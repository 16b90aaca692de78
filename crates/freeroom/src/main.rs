use std::env;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freeroom::db::ConfigDbManager;
use freeroom::refresh;
use freeroom::server;
use freeroom::types::AppState;
use freeroom::upstream::{HttpClassroomProvider, UpstreamConfig};
use freeroom::vacancy::preset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "freeroom=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path = env::var("FREEROOM_DB").unwrap_or_else(|_| "freeroom.db".to_string());
    let addr = env::var("FREEROOM_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());

    let mut upstream_config = UpstreamConfig::default();
    if let Ok(base_url) = env::var("FREEROOM_UPSTREAM_URL") {
        upstream_config.base_url = base_url;
    }
    if let Ok(school_area) = env::var("FREEROOM_SCHOOL_AREA") {
        upstream_config.school_area = school_area;
    }

    let provider = Arc::new(HttpClassroomProvider::with_config(upstream_config)?);
    let config_db = ConfigDbManager::new(&db_path)?;
    let user_config = config_db.load_or_default()?;
    info!(
        presets = user_config.presets.len(),
        last_used = %user_config.last_used_preset,
        "Loaded persisted user config"
    );

    let state = Arc::new(AppState::new(provider, config_db, user_config));

    // Initial data load. A failure here is not fatal: the server starts
    // with an empty snapshot and the next POST /refresh tries again.
    match refresh::run_refresh(&state).await {
        Ok(()) => restore_last_used_preset(&state).await,
        Err(e) => warn!(error = %e, "Startup refresh failed, serving empty snapshot"),
    }

    let app = server::create_router(state.clone());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

/// Re-applies the preset the user had active last time, if it still exists.
async fn restore_last_used_preset(state: &AppState) {
    let mut user_config = state.user_config.write().await;
    let name = user_config.last_used_preset.clone();
    if name.is_empty() {
        return;
    }

    match preset::load_preset(&mut user_config, &name) {
        Ok(query) => {
            drop(user_config);
            *state.query.write().await = query;
            info!(preset = %name, "Restored last used preset");
        }
        Err(e) => warn!(preset = %name, error = %e, "Could not restore last used preset"),
    }
}
