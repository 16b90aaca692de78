//! Occupancy evaluation: recomputes the derived per-classroom fields from
//! the current section and the active academic week.
//!
//! The three transforms are idempotent and must be applied together from
//! the same `(current_section, week)` pair; mixing a fresh section with
//! stale vacancy is a correctness bug, so callers should prefer
//! [`evaluate`] over the individual updates.

use super::types::{Classroom, NO_SECTION};

/// Sets `last_section` for every classroom: the latest `end_section` over
/// the bookings active this week, independent of the current section.
pub fn update_last_section(classrooms: &mut [Classroom], week: u32) {
    for room in classrooms.iter_mut() {
        room.last_section = room
            .courses
            .iter()
            .filter(|c| c.active_in_week(week))
            .map(|c| c.end_section)
            .max()
            .unwrap_or(NO_SECTION);
    }
}

/// Sets `next_section` for every classroom: the earliest `start_section`
/// over this week's bookings that begin strictly after the current section.
pub fn update_next_section(classrooms: &mut [Classroom], current_section: i32, week: u32) {
    for room in classrooms.iter_mut() {
        room.next_section = room
            .courses
            .iter()
            .filter(|c| c.active_in_week(week) && c.start_section > current_section)
            .map(|c| c.start_section)
            .min()
            .unwrap_or(NO_SECTION);
    }
}

/// True if no booking occupies the room at `current_section` in `week`.
/// A room without bookings is always vacant.
pub fn is_classroom_vacant(room: &Classroom, current_section: i32, week: u32) -> bool {
    if room.courses.is_empty() {
        return true;
    }
    room.courses.iter().all(|c| {
        !c.active_in_week(week)
            || c.start_section > current_section
            || c.end_section < current_section
    })
}

/// Sets `is_vacant` for every classroom.
pub fn update_vacancy(classrooms: &mut [Classroom], current_section: i32, week: u32) {
    for room in classrooms.iter_mut() {
        room.is_vacant = is_classroom_vacant(room, current_section, week);
    }
}

/// Applies all three derived-field updates from one consistent
/// `(current_section, week)` pair.
pub fn evaluate(classrooms: &mut [Classroom], current_section: i32, week: u32) {
    update_last_section(classrooms, week);
    update_next_section(classrooms, current_section, week);
    update_vacancy(classrooms, current_section, week);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vacancy::types::CourseBooking;
    use std::collections::BTreeSet;

    fn booking(start: i32, end: i32, weeks: &[&str]) -> CourseBooking {
        CourseBooking {
            start_section: start,
            end_section: end,
            weeks: weeks.iter().map(|w| w.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    fn room(courses: Vec<CourseBooking>) -> Classroom {
        Classroom::new(
            "101".to_string(),
            "East 101".to_string(),
            "5".to_string(),
            0,
            courses,
        )
    }

    #[test]
    fn test_room_without_bookings_is_always_vacant() {
        let empty = room(vec![]);
        for section in -1..=10 {
            for week in 1..=20 {
                assert!(is_classroom_vacant(&empty, section, week));
            }
        }
    }

    #[test]
    fn test_occupancy_over_course_span() {
        let r = room(vec![booking(2, 4, &["3"])]);
        assert!(is_classroom_vacant(&r, 1, 3));
        assert!(!is_classroom_vacant(&r, 2, 3));
        assert!(!is_classroom_vacant(&r, 3, 3));
        assert!(!is_classroom_vacant(&r, 4, 3));
        assert!(is_classroom_vacant(&r, 5, 3));
        // Inactive week: vacant at every section.
        assert!(is_classroom_vacant(&r, 3, 4));
    }

    #[test]
    fn test_last_section_ignores_current_section() {
        let mut rooms = vec![room(vec![
            booking(1, 2, &["3"]),
            booking(5, 8, &["3"]),
            booking(9, 10, &["4"]),
        ])];
        update_last_section(&mut rooms, 3);
        assert_eq!(rooms[0].last_section, 8);
        update_last_section(&mut rooms, 4);
        assert_eq!(rooms[0].last_section, 10);
        update_last_section(&mut rooms, 5);
        assert_eq!(rooms[0].last_section, NO_SECTION);
    }

    #[test]
    fn test_next_section_is_min_strictly_after_current() {
        let mut rooms = vec![room(vec![
            booking(2, 3, &["1"]),
            booking(6, 7, &["1"]),
            booking(4, 5, &["2"]),
        ])];
        update_next_section(&mut rooms, 1, 1);
        assert_eq!(rooms[0].next_section, 2);
        // A booking that starts at the current section does not qualify.
        update_next_section(&mut rooms, 2, 1);
        assert_eq!(rooms[0].next_section, 6);
        update_next_section(&mut rooms, 6, 1);
        assert_eq!(rooms[0].next_section, NO_SECTION);
    }

    #[test]
    fn test_evaluate_applies_all_three() {
        let mut rooms = vec![room(vec![booking(2, 4, &["3"])]), room(vec![])];
        evaluate(&mut rooms, 3, 3);
        assert_eq!(rooms[0].next_section, NO_SECTION);
        assert_eq!(rooms[0].last_section, 4);
        assert!(!rooms[0].is_vacant);
        assert_eq!(rooms[1].next_section, NO_SECTION);
        assert_eq!(rooms[1].last_section, NO_SECTION);
        assert!(rooms[1].is_vacant);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut rooms = vec![room(vec![booking(2, 4, &["3"]), booking(6, 7, &["3"])])];
        evaluate(&mut rooms, 3, 3);
        let once = rooms.clone();
        evaluate(&mut rooms, 3, 3);
        assert_eq!(rooms, once);
    }
}
