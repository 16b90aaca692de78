//! Maps a wall-clock time to a 1-based section index on the day's bell
//! schedule.

use super::types::{ClockTime, SectionWindow};

/// Resolves the section a given time of day falls in.
///
/// Returns `0` when the timetable is empty or the instant is before the
/// first period, `i + 1` for an instant inside window `i` (bounds
/// inclusive), and `timetable.len()` once the last period has ended.
///
/// An instant in the gap between two periods resolves to the *upcoming*
/// period: breaks count toward the section that is about to start.
pub fn resolve_section(instant: ClockTime, timetable: &[SectionWindow]) -> i32 {
    if timetable.is_empty() {
        return 0;
    }
    if instant < timetable[0].start {
        return 0;
    }
    for (i, window) in timetable.iter().enumerate() {
        if instant >= window.start && instant <= window.end {
            return (i + 1) as i32;
        }
        if instant < window.start {
            return (i + 1) as i32;
        }
    }
    timetable.len() as i32
}

/// Formats a resolved section as its bell-schedule window, if it names a
/// real period.
pub fn section_window(section: i32, timetable: &[SectionWindow]) -> Option<SectionWindow> {
    if section < 1 || section as usize > timetable.len() {
        return None;
    }
    Some(timetable[section as usize - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Vec<SectionWindow> {
        vec![
            SectionWindow {
                start: ClockTime::new(8, 0),
                end: ClockTime::new(8, 45),
            },
            SectionWindow {
                start: ClockTime::new(9, 0),
                end: ClockTime::new(9, 45),
            },
        ]
    }

    #[test]
    fn test_empty_timetable() {
        assert_eq!(resolve_section(ClockTime::new(10, 0), &[]), 0);
    }

    #[test]
    fn test_before_first_period() {
        assert_eq!(resolve_section(ClockTime::new(7, 0), &schedule()), 0);
        assert_eq!(resolve_section(ClockTime::new(7, 59), &schedule()), 0);
    }

    #[test]
    fn test_inside_period_bounds_inclusive() {
        assert_eq!(resolve_section(ClockTime::new(8, 0), &schedule()), 1);
        assert_eq!(resolve_section(ClockTime::new(8, 20), &schedule()), 1);
        assert_eq!(resolve_section(ClockTime::new(8, 45), &schedule()), 1);
        assert_eq!(resolve_section(ClockTime::new(9, 10), &schedule()), 2);
    }

    #[test]
    fn test_gap_attributed_to_next_period() {
        assert_eq!(resolve_section(ClockTime::new(8, 50), &schedule()), 2);
    }

    #[test]
    fn test_after_last_period() {
        assert_eq!(resolve_section(ClockTime::new(10, 0), &schedule()), 2);
        assert_eq!(resolve_section(ClockTime::new(23, 59), &schedule()), 2);
    }

    #[test]
    fn test_monotonic_over_the_day() {
        let tt = schedule();
        let mut prev = resolve_section(ClockTime::new(0, 0), &tt);
        for hour in 0..24u8 {
            for minute in 0..60u8 {
                let cur = resolve_section(ClockTime::new(hour, minute), &tt);
                assert!(cur >= prev, "not monotonic at {hour:02}:{minute:02}");
                prev = cur;
            }
        }
    }

    #[test]
    fn test_section_window_lookup() {
        let tt = schedule();
        assert_eq!(section_window(0, &tt), None);
        assert_eq!(section_window(1, &tt), Some(tt[0]));
        assert_eq!(section_window(2, &tt), Some(tt[1]));
        assert_eq!(section_window(3, &tt), None);
    }
}
