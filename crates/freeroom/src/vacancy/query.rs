//! Query pipeline: narrows the classroom set with status/building/room
//! filters, then orders it with a sequence of stable sorts.

use super::types::Classroom;
use serde::{Deserialize, Serialize};

/// Vacancy status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Vacant,
    Occupied,
}

impl StatusFilter {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "all" => Some(StatusFilter::All),
            "vacant" => Some(StatusFilter::Vacant),
            "occupied" => Some(StatusFilter::Occupied),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Vacant => "vacant",
            StatusFilter::Occupied => "occupied",
        }
    }

    fn keeps(&self, room: &Classroom) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Vacant => room.is_vacant,
            StatusFilter::Occupied => !room.is_vacant,
        }
    }
}

/// One sort criterion; the serialized form is the persisted token
/// (`asc_students`, `desc_next`, ...). The `End` pair orders by
/// `last_section`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    AscStudents,
    DescStudents,
    AscNext,
    DescNext,
    AscEnd,
    DescEnd,
}

impl SortKey {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "asc_students" => Some(SortKey::AscStudents),
            "desc_students" => Some(SortKey::DescStudents),
            "asc_next" => Some(SortKey::AscNext),
            "desc_next" => Some(SortKey::DescNext),
            "asc_end" => Some(SortKey::AscEnd),
            "desc_end" => Some(SortKey::DescEnd),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SortKey::AscStudents => "asc_students",
            SortKey::DescStudents => "desc_students",
            SortKey::AscNext => "asc_next",
            SortKey::DescNext => "desc_next",
            SortKey::AscEnd => "asc_end",
            SortKey::DescEnd => "desc_end",
        }
    }

    fn sort(&self, rooms: &mut [Classroom]) {
        match self {
            SortKey::AscStudents => rooms.sort_by(|a, b| a.number_students.cmp(&b.number_students)),
            SortKey::DescStudents => {
                rooms.sort_by(|a, b| b.number_students.cmp(&a.number_students))
            }
            SortKey::AscNext => rooms.sort_by(|a, b| a.next_section.cmp(&b.next_section)),
            SortKey::DescNext => rooms.sort_by(|a, b| b.next_section.cmp(&a.next_section)),
            SortKey::AscEnd => rooms.sort_by(|a, b| a.last_section.cmp(&b.last_section)),
            SortKey::DescEnd => rooms.sort_by(|a, b| b.last_section.cmp(&a.last_section)),
        }
    }
}

/// The active query pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub building_ids: Vec<String>,
    #[serde(default)]
    pub classroom_ids: Vec<String>,
    #[serde(default)]
    pub sort_options: Vec<SortKey>,
}

/// Filters and orders a classroom collection.
///
/// Filters narrow in a fixed order (status, then building, then room); an
/// empty id set means "no restriction". The sort criteria are applied one
/// after another, each as a stable sort over the previous order, so the
/// LAST criterion is the primary key and earlier ones only order its ties.
/// That rightmost-wins carryover is observable behavior and must not be
/// collapsed into a single multi-key comparator.
pub fn apply(classrooms: &[Classroom], config: &QueryConfig) -> Vec<Classroom> {
    let mut result: Vec<Classroom> = classrooms
        .iter()
        .filter(|c| config.status.keeps(c))
        .filter(|c| config.building_ids.is_empty() || config.building_ids.contains(&c.building_id))
        .filter(|c| config.classroom_ids.is_empty() || config.classroom_ids.contains(&c.id))
        .cloned()
        .collect();

    for key in &config.sort_options {
        key.sort(&mut result);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, building: &str, vacant: bool, students: u32, next: i32, last: i32) -> Classroom {
        Classroom {
            id: id.to_string(),
            name: format!("Room {id}"),
            building_id: building.to_string(),
            number_students: students,
            courses: vec![],
            next_section: next,
            last_section: last,
            is_vacant: vacant,
        }
    }

    fn sample() -> Vec<Classroom> {
        vec![
            room("1", "5", true, 10, 1, 4),
            room("2", "5", false, 20, 3, 8),
            room("3", "6", true, 5, -1, -1),
            room("4", "6", false, 40, 2, 10),
        ]
    }

    #[test]
    fn test_default_config_keeps_everything_in_order() {
        let rooms = sample();
        let out = apply(&rooms, &QueryConfig::default());
        assert_eq!(out, rooms);
    }

    #[test]
    fn test_status_and_building_filters_intersect() {
        let rooms = sample();
        let config = QueryConfig {
            status: StatusFilter::Vacant,
            building_ids: vec!["5".to_string()],
            ..Default::default()
        };
        let out = apply(&rooms, &config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");

        // The result set is the same regardless of conceptual filter order:
        // both filters are pure membership predicates.
        let occupied_in_6 = QueryConfig {
            status: StatusFilter::Occupied,
            building_ids: vec!["6".to_string()],
            ..Default::default()
        };
        let out = apply(&rooms, &occupied_in_6);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "4");
    }

    #[test]
    fn test_room_filter() {
        let rooms = sample();
        let config = QueryConfig {
            classroom_ids: vec!["2".to_string(), "3".to_string()],
            ..Default::default()
        };
        let ids: Vec<_> = apply(&rooms, &config).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_rightmost_sort_wins_with_stable_ties() {
        // A(students=10, next=1), B(students=5, next=1), C(students=5, next=2).
        let rooms = vec![
            room("A", "5", true, 10, 1, 0),
            room("B", "5", true, 5, 1, 0),
            room("C", "5", true, 5, 2, 0),
        ];
        let config = QueryConfig {
            sort_options: vec![SortKey::AscStudents, SortKey::DescNext],
            ..Default::default()
        };
        let ids: Vec<_> = apply(&rooms, &config).into_iter().map(|r| r.id).collect();
        // desc_next is primary; asc_students only orders the next=1 tie.
        assert_eq!(ids, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_single_sort_key() {
        let rooms = sample();
        let config = QueryConfig {
            sort_options: vec![SortKey::AscEnd],
            ..Default::default()
        };
        let ids: Vec<_> = apply(&rooms, &config).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["3", "1", "2", "4"]);
    }

    #[test]
    fn test_sort_key_tokens_round_trip() {
        for key in [
            SortKey::AscStudents,
            SortKey::DescStudents,
            SortKey::AscNext,
            SortKey::DescNext,
            SortKey::AscEnd,
            SortKey::DescEnd,
        ] {
            assert_eq!(SortKey::parse(key.token()), Some(key));
            // The serde form matches the persisted token.
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.token()));
        }
        assert_eq!(SortKey::parse("asc_noise"), None);
    }
}
