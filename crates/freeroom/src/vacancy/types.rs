/// Domain types for the vacancy engine
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Sentinel for "no qualifying section" in the derived classroom fields.
pub const NO_SECTION: i32 = -1;

/// A time of day at minute granularity.
///
/// Seconds are discarded at construction on purpose: section containment and
/// ordering must agree on the same truncation, so two instants that differ
/// only below the minute compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Parses `"HH:MM"` (also accepts `"HH:MM:SS"`, dropping the seconds).
    pub fn parse(s: &str) -> Option<Self> {
        let t = NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()?;
        Some(Self::from_naive(t))
    }

    pub fn from_naive(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One period of the day's bell schedule.
///
/// A timetable is a `Vec<SectionWindow>` sorted by `start`; index 0 is the
/// first period of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// One recurring weekly booking occupying a room from `start_section` to
/// `end_section` inclusive, on the weeks listed in `weeks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseBooking {
    pub start_section: i32,
    pub end_section: i32,
    /// Week numbers as strings; a booking applies iff the active week's
    /// stringified number is a member.
    pub weeks: BTreeSet<String>,
}

impl CourseBooking {
    /// True if this booking applies in the given academic week.
    pub fn active_in_week(&self, week: u32) -> bool {
        self.weeks.contains(week.to_string().as_str())
    }
}

/// A classroom with its bookings and the derived occupancy fields.
///
/// `next_section`, `last_section` and `is_vacant` are projections of the
/// last evaluator run; they are meaningless until `evaluator::evaluate` has
/// been applied and go stale if the current section or active week changes
/// without a re-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub building_id: String,
    pub number_students: u32,
    pub courses: Vec<CourseBooking>,
    pub next_section: i32,
    pub last_section: i32,
    pub is_vacant: bool,
}

impl Classroom {
    pub fn new(
        id: String,
        name: String,
        building_id: String,
        number_students: u32,
        courses: Vec<CourseBooking>,
    ) -> Self {
        Self {
            id,
            name,
            building_id,
            number_students,
            courses,
            next_section: NO_SECTION,
            last_section: NO_SECTION,
            is_vacant: false,
        }
    }
}

/// The currently active academic week, supplied by the upstream system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterInfo {
    pub year: String,
    pub week: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
}

/// A named snapshot of the query pipeline configuration, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreset {
    pub name: String,
    pub status: String,
    pub building_ids: Vec<String>,
    pub classroom_ids: Vec<String>,
    pub sort_options: Vec<String>,
}

/// The persisted root object; the sole unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub presets: Vec<UserPreset>,
    #[serde(default)]
    pub last_used_preset: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_time_parse_drops_seconds() {
        let a = ClockTime::parse("08:45").unwrap();
        let b = ClockTime::parse("08:45:59").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, ClockTime::new(8, 45));
    }

    #[test]
    fn test_clock_time_ordering() {
        assert!(ClockTime::new(8, 0) < ClockTime::new(8, 1));
        assert!(ClockTime::new(9, 0) > ClockTime::new(8, 59));
        assert_eq!(ClockTime::new(12, 30), ClockTime::new(12, 30));
    }

    #[test]
    fn test_booking_week_membership_is_exact() {
        let booking = CourseBooking {
            start_section: 1,
            end_section: 2,
            weeks: BTreeSet::from(["12".to_string()]),
        };
        assert!(booking.active_in_week(12));
        // "1" is a substring of "12" but not a member.
        assert!(!booking.active_in_week(1));
        assert!(!booking.active_in_week(2));
    }
}
