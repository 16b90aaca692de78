//! Shared application state.

use crate::db::ConfigDbManager;
use crate::upstream::ClassroomDataProvider;
use crate::vacancy::query::QueryConfig;
use crate::vacancy::{Building, Classroom, ClockTime, SectionWindow, SemesterInfo, UserConfig};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// The result of one full refresh, replaced atomically as a whole.
///
/// `current_section` and the classroom derived fields always come from the
/// same evaluator run; a snapshot is never published mid-computation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub semester: SemesterInfo,
    pub timetable: Vec<SectionWindow>,
    pub buildings: Vec<Building>,
    pub classrooms: Vec<Classroom>,
    pub current_time: ClockTime,
    pub current_section: i32,
    pub refreshed_at: Option<DateTime<Local>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            semester: SemesterInfo {
                year: "2025".to_string(),
                week: 1,
                name: "1".to_string(),
            },
            timetable: Vec::new(),
            buildings: Vec::new(),
            classrooms: Vec::new(),
            current_time: ClockTime::new(0, 0),
            current_section: 0,
            refreshed_at: None,
        }
    }
}

/// The app server state.
pub struct AppState {
    /// Source of schedule/room data
    pub provider: Arc<dyn ClassroomDataProvider>,
    /// Persisted user-configuration store
    pub config_db: ConfigDbManager,
    /// Latest refresh result
    pub snapshot: RwLock<Snapshot>,
    /// Active query-pipeline configuration
    pub query: RwLock<QueryConfig>,
    /// Presets and last-used recall, mirrored to the store on mutation
    pub user_config: RwLock<UserConfig>,
    /// Serializes full refreshes; a second refresh queues behind the
    /// in-flight one
    pub refresh_lock: Mutex<()>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn ClassroomDataProvider>,
        config_db: ConfigDbManager,
        user_config: UserConfig,
    ) -> Self {
        Self {
            provider,
            config_db,
            snapshot: RwLock::new(Snapshot::default()),
            query: RwLock::new(QueryConfig::default()),
            user_config: RwLock::new(user_config),
            refresh_lock: Mutex::new(()),
        }
    }
}
