//! Raw upstream payload shapes.
//!
//! The campus information system wraps every response in a `data` envelope
//! and is loose with scalar types (ids arrive as numbers or strings
//! depending on the endpoint), so id-like fields go through
//! [`string_or_number`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Bell schedule: `data.section` is the ordered period list.
#[derive(Debug, Deserialize)]
pub struct TimetablePayload {
    #[serde(default)]
    pub section: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
pub struct RawSection {
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

/// Current semester: `data` itself.
#[derive(Debug, Deserialize)]
pub struct SemesterPayload {
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    pub week: u32,
    #[serde(deserialize_with = "string_or_number")]
    pub sename: String,
}

/// Building list: one entry per campus area, buildings in `children`.
#[derive(Debug, Deserialize)]
pub struct BuildingsPayload {
    #[serde(rename = "buildList", default)]
    pub build_list: Vec<RawCampus>,
}

#[derive(Debug, Deserialize)]
pub struct RawCampus {
    #[serde(default)]
    pub children: Vec<RawBuilding>,
}

#[derive(Debug, Deserialize)]
pub struct RawBuilding {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Slash-separated path, e.g. "Minhang/East Upper Block"
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Rooms of one building, grouped by floor.
#[derive(Debug, Deserialize)]
pub struct RoomsPayload {
    #[serde(rename = "floorList", default)]
    pub floor_list: Vec<RawFloor>,
}

#[derive(Debug, Deserialize)]
pub struct RawFloor {
    #[serde(default)]
    pub children: Vec<RawRoom>,
    /// Live occupant counts, keyed by room id. Absent outside teaching hours.
    #[serde(rename = "roomStuNumbs", default)]
    pub room_stu_numbs: Vec<RawOccupancy>,
}

#[derive(Debug, Deserialize)]
pub struct RawOccupancy {
    #[serde(rename = "roomId", deserialize_with = "string_or_number")]
    pub room_id: String,
    #[serde(rename = "actualStuNum", default)]
    pub actual_stu_num: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawRoom {
    #[serde(rename = "nodeId", deserialize_with = "string_or_number")]
    pub node_id: String,
    /// Slash-separated path, e.g. "Minhang/East Upper Block/East 105"
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// "1" (or 1) marks a room usable for self-study.
    #[serde(rename = "freeRoom", default, deserialize_with = "opt_string_or_number")]
    pub free_room: Option<String>,
    #[serde(rename = "roomCourseList", default)]
    pub room_course_list: Vec<RawRoomCourse>,
}

#[derive(Debug, Deserialize)]
pub struct RawRoomCourse {
    #[serde(rename = "startSection")]
    pub start_section: i32,
    #[serde(rename = "endSection")]
    pub end_section: i32,
    /// Week numbers packed into one delimited string, e.g. "1,2,3,4".
    #[serde(rename = "assignedWeeks", default)]
    pub assigned_weeks: String,
}

/// Accepts either a JSON string or a number and yields its string form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
    })
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ids_accept_both_forms() {
        let payload: Envelope<BuildingsPayload> = serde_json::from_str(
            r#"{"data": {"buildList": [{"children": [
                {"id": 17, "fullName": "Minhang/East Upper Block"},
                {"id": "18", "fullName": "Minhang/East Middle Block"}
            ]}]}}"#,
        )
        .unwrap();
        let buildings = &payload.data.build_list[0].children;
        assert_eq!(buildings[0].id, "17");
        assert_eq!(buildings[1].id, "18");
    }

    #[test]
    fn test_room_defaults() {
        let room: RawRoom = serde_json::from_str(
            r#"{"nodeId": "101", "fullName": "A/B/C 101"}"#,
        )
        .unwrap();
        assert_eq!(room.free_room, None);
        assert!(room.room_course_list.is_empty());
    }
}
