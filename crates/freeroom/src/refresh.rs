//! Full-refresh orchestration.
//!
//! One refresh fetches semester info, the bell schedule and the building
//! list, then fans out one room request per building and joins them
//! all-or-none: any failure aborts the refresh and the previous snapshot
//! stays in place. Refreshes are serialized behind `AppState::refresh_lock`
//! (a refresh triggered while one is in flight waits, then runs).

use crate::types::{AppState, Snapshot};
use crate::upstream::UpstreamError;
use crate::vacancy::{evaluator, section, Classroom, ClockTime};
use chrono::Local;
use futures::future;
use rand::Rng;
use std::time::Instant;
use tracing::{error, info};

/// Runs a full refresh and atomically replaces the snapshot on success.
pub async fn run_refresh(state: &AppState) -> Result<(), UpstreamError> {
    let _guard = state.refresh_lock.lock().await;

    let correlation_id = generate_correlation_id();
    let start = Instant::now();
    info!(correlation_id = %correlation_id, "Starting full refresh");

    match build_snapshot(state).await {
        Ok(snapshot) => {
            info!(
                correlation_id = %correlation_id,
                duration_ms = start.elapsed().as_millis() as u64,
                week = snapshot.semester.week,
                section = snapshot.current_section,
                buildings = snapshot.buildings.len(),
                rooms = snapshot.classrooms.len(),
                "Refresh complete"
            );
            *state.snapshot.write().await = snapshot;
            Ok(())
        }
        Err(e) => {
            error!(
                correlation_id = %correlation_id,
                error = %e,
                retryable = e.is_retryable(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Refresh failed, keeping previous snapshot"
            );
            Err(e)
        }
    }
}

/// Fetches everything and evaluates the new classroom set. Pure with
/// respect to `state`: nothing is published until the caller swaps the
/// snapshot in.
async fn build_snapshot(state: &AppState) -> Result<Snapshot, UpstreamError> {
    let semester = state.provider.fetch_semester_info().await?;

    let mut timetable = state.provider.fetch_bell_schedule().await?;
    timetable.sort_by(|a, b| a.start.cmp(&b.start));

    let buildings = state.provider.fetch_buildings().await?;

    // One request per building, concurrently; the join is all-or-none.
    let room_sets = future::try_join_all(
        buildings
            .iter()
            .map(|b| state.provider.fetch_rooms_for_building(&b.id)),
    )
    .await?;
    let mut classrooms: Vec<Classroom> = room_sets.into_iter().flatten().collect();

    let now = ClockTime::from_naive(Local::now().time());
    let current_section = section::resolve_section(now, &timetable);
    evaluator::evaluate(&mut classrooms, current_section, semester.week);

    Ok(Snapshot {
        semester,
        timetable,
        buildings,
        classrooms,
        current_time: now,
        current_section,
        refreshed_at: Some(Local::now()),
    })
}

/// Moves the time cursor to a user-chosen wall-clock time and re-evaluates
/// the derived fields against the same active week. The next full refresh
/// resets the cursor to the real current time.
pub async fn apply_time_override(state: &AppState, instant: ClockTime) -> (i32, u32) {
    let mut guard = state.snapshot.write().await;
    let snapshot = &mut *guard;

    snapshot.current_time = instant;
    snapshot.current_section = section::resolve_section(instant, &snapshot.timetable);
    evaluator::evaluate(
        &mut snapshot.classrooms,
        snapshot.current_section,
        snapshot.semester.week,
    );

    info!(
        time = %instant,
        section = snapshot.current_section,
        week = snapshot.semester.week,
        "Applied manual time override"
    );
    (snapshot.current_section, snapshot.semester.week)
}

/// Generates a unique correlation ID for request tracing.
fn generate_correlation_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
