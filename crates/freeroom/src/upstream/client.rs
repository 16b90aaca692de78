//! HTTP client for the campus information system.
//!
//! Every endpoint answers POST requests with a JSON `data` envelope; the
//! mapping functions below turn those payloads into domain types:
//! buildings and rooms take the last segment of their slash-separated
//! `fullName` as display name, only rooms flagged free-room-capable are
//! kept, and the packed week string of each booking is split into a week
//! set.

use super::dto::{
    BuildingsPayload, Envelope, RawRoomCourse, RoomsPayload, SemesterPayload, TimetablePayload,
};
use super::error::UpstreamError;
use super::ClassroomDataProvider;
use crate::vacancy::{Building, Classroom, ClockTime, CourseBooking, SectionWindow, SemesterInfo};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Base URL of the campus information system.
const DEFAULT_BASE_URL: &str = "https://ids.sjtu.edu.cn";

/// Paths for the consumed endpoints.
const SEMESTER_PATH: &str = "/course/findCurSemester";
const TIMETABLE_PATH: &str = "/course/findSection";
const BUILDINGS_PATH: &str = "/build/findAreaBuild";
const ROOMS_PATH: &str = "/build/findBuildRoomType";

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the information system
    pub base_url: String,
    /// Campus area selector for the building list
    pub school_area: String,
    /// User agent string
    pub user_agent: String,
    /// Connect timeout per request
    pub connect_timeout: Duration,
    /// Total timeout per request
    pub request_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            school_area: "0".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Reqwest-backed provider for classroom data.
pub struct HttpClassroomProvider {
    client: Client,
    config: UpstreamConfig,
}

impl HttpClassroomProvider {
    /// Creates a provider with default configuration.
    pub fn new() -> Result<Self, UpstreamError> {
        Self::with_config(UpstreamConfig::default())
    }

    /// Creates a provider with custom configuration.
    pub fn with_config(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        // Fail fast on a bad base URL instead of per request.
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| UpstreamError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// POSTs to `path` and unwraps the `data` envelope.
    async fn post_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(url = %url, "Upstream request");

        let response = self.client.post(&url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(UpstreamError::UnexpectedResponse {
                message: format!("{} returned status {}", path, response.status()),
            });
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ClassroomDataProvider for HttpClassroomProvider {
    async fn fetch_semester_info(&self) -> Result<SemesterInfo, UpstreamError> {
        let payload: SemesterPayload = self.post_data(SEMESTER_PATH, &[]).await?;
        info!(year = %payload.year, week = payload.week, "Fetched semester info");
        Ok(SemesterInfo {
            year: payload.year,
            week: payload.week,
            name: payload.sename,
        })
    }

    async fn fetch_bell_schedule(&self) -> Result<Vec<SectionWindow>, UpstreamError> {
        let payload: TimetablePayload = self.post_data(TIMETABLE_PATH, &[]).await?;
        let windows = section_windows_from_payload(payload)?;
        info!(sections = windows.len(), "Fetched bell schedule");
        Ok(windows)
    }

    async fn fetch_buildings(&self) -> Result<Vec<Building>, UpstreamError> {
        let payload: BuildingsPayload = self
            .post_data(BUILDINGS_PATH, &[("schoolArea", self.config.school_area.as_str())])
            .await?;
        let buildings = buildings_from_payload(payload);
        info!(buildings = buildings.len(), "Fetched building list");
        Ok(buildings)
    }

    async fn fetch_rooms_for_building(
        &self,
        building_id: &str,
    ) -> Result<Vec<Classroom>, UpstreamError> {
        let payload: RoomsPayload = self
            .post_data(
                ROOMS_PATH,
                &[("buildId", building_id), ("mobileType", "mobileFlag")],
            )
            .await?;
        let rooms = classrooms_from_payload(building_id, payload);
        debug!(building_id = %building_id, rooms = rooms.len(), "Fetched rooms");
        Ok(rooms)
    }
}

/// Converts the raw bell schedule, rejecting malformed period times.
pub(crate) fn section_windows_from_payload(
    payload: TimetablePayload,
) -> Result<Vec<SectionWindow>, UpstreamError> {
    payload
        .section
        .into_iter()
        .map(|raw| {
            let start = ClockTime::parse(&raw.start_time);
            let end = ClockTime::parse(&raw.end_time);
            match (start, end) {
                (Some(start), Some(end)) => Ok(SectionWindow { start, end }),
                _ => Err(UpstreamError::Parse {
                    message: format!(
                        "Malformed section time '{}'-'{}'",
                        raw.start_time, raw.end_time
                    ),
                }),
            }
        })
        .collect()
}

/// Flattens the campus tree into a building list.
pub(crate) fn buildings_from_payload(payload: BuildingsPayload) -> Vec<Building> {
    payload
        .build_list
        .into_iter()
        .flat_map(|campus| campus.children)
        .map(|raw| Building {
            id: raw.id,
            name: display_name(&raw.full_name).to_string(),
        })
        .collect()
}

/// Flattens a building's floor tree into classrooms.
///
/// Rooms not flagged free-room-capable are skipped; derived occupancy
/// fields start at their sentinel values and stay meaningless until the
/// evaluator runs.
pub(crate) fn classrooms_from_payload(building_id: &str, payload: RoomsPayload) -> Vec<Classroom> {
    let mut classrooms = Vec::new();

    for floor in payload.floor_list {
        let occupant_counts: HashMap<String, u32> = floor
            .room_stu_numbs
            .into_iter()
            .map(|o| (o.room_id, o.actual_stu_num))
            .collect();

        for room in floor.children {
            let is_free_room = room
                .free_room
                .as_deref()
                .and_then(|flag| flag.trim().parse::<i64>().ok())
                == Some(1);
            if !is_free_room {
                continue;
            }

            let courses = room.room_course_list.iter().map(booking_from_raw).collect();
            let number_students = occupant_counts.get(&room.node_id).copied().unwrap_or(0);

            classrooms.push(Classroom::new(
                room.node_id.clone(),
                display_name(&room.full_name).to_string(),
                building_id.to_string(),
                number_students,
                courses,
            ));
        }
    }

    classrooms
}

fn booking_from_raw(raw: &RawRoomCourse) -> CourseBooking {
    CourseBooking {
        start_section: raw.start_section,
        end_section: raw.end_section,
        weeks: split_week_tokens(&raw.assigned_weeks),
    }
}

/// Splits the packed week string into its week-number tokens.
fn split_week_tokens(raw: &str) -> BTreeSet<String> {
    raw.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

/// Last segment of a slash-separated display path.
fn display_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name)
}
