//! Day partitioning and row matching
//!
//! The schedule renders as one continuous list: day headers followed by the
//! rows that belong to them, with no structural parent grouping the two.
//! The only reliable association is layout geometry — a row belongs to the
//! day of the nearest header above it. This module partitions the rendered
//! row stream into per-day intervals from the headers' vertical positions
//! and matches rows inside the target day's interval.
//!
//! Everything here is pure over snapshot data, so it tests against synthetic
//! positions without a rendering engine.

use crate::error::{BookingError, Result};
use crate::schedule::snapshot::{DayHeader, ScheduleRow, ScheduleSnapshot};
use crate::schedule::target::TargetSpec;

/// Headers closer together than this are treated as one position
///
/// Some releases render a sticky duplicate of the active day header at
/// effectively the same offset; it must not terminate the day's interval.
const HEADER_POSITION_EPSILON: f64 = 1.0;

/// The half-open vertical interval `[lower, upper)` owned by one day header
///
/// `upper` is the position of the next header strictly below, or infinity
/// for the last rendered day.
pub fn day_interval(headers: &[DayHeader], day_text: &str) -> Option<(f64, f64)> {
    let header = headers.iter().find(|h| h.text.contains(day_text))?;
    let lower = header.top;

    let upper = headers
        .iter()
        .map(|h| h.top)
        .filter(|&top| top > lower + HEADER_POSITION_EPSILON)
        .fold(f64::INFINITY, f64::min);

    Some((lower, upper))
}

/// Locate the target slot among the currently rendered headers and rows
///
/// In document order, the first row wins that
/// 1. falls inside the target day's interval,
/// 2. has a start-time token exactly equal to the target's normalized form
///    (a rendered `07:30` does not match a target `7:30`),
/// 3. passes the activity-name substring filter, if one is set, and
/// 4. carries a `Book` or `Waitlist` action button — rows in any other state
///    are skipped even when time and name match.
pub fn locate_slot<'a>(snapshot: &'a ScheduleSnapshot, target: &TargetSpec) -> Result<&'a ScheduleRow> {
    let day_text = target.day_header_text();

    let (lower, upper) = day_interval(&snapshot.headers, &day_text)
        .ok_or_else(|| BookingError::DayNotFound { day: day_text.clone() })?;

    let start = target.start_time.to_string();
    let name_filter = target.activity.as_ref().map(|s| s.to_lowercase());

    snapshot
        .rows
        .iter()
        .filter(|row| row.top >= lower && row.top < upper)
        .find(|row| row_matches(row, &start, name_filter.as_deref()))
        .ok_or(BookingError::SlotNotFound {
            day: day_text,
            time: start,
            activity: target.activity.clone(),
        })
}

fn row_matches(row: &ScheduleRow, start: &str, name_filter: Option<&str>) -> bool {
    if row.start_token() != start {
        return false;
    }

    if let Some(filter) = name_filter {
        match &row.name {
            Some(name) if name.to_lowercase().contains(filter) => {}
            _ => return false,
        }
    }

    row.action_label().is_bookable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::target::StartTime;
    use chrono::NaiveDate;

    fn header(text: &str, top: f64) -> DayHeader {
        DayHeader { text: text.to_string(), top, visible: true }
    }

    fn row(top: f64, time_text: &str, name: Option<&str>, action: &str) -> ScheduleRow {
        ScheduleRow {
            time_text: time_text.to_string(),
            name: name.map(str::to_string),
            action: Some(action.to_string()),
            top,
            visible: true,
            css_path: format!("body > div:nth-child({})", top as u32),
            button_path: Some(format!("body > div:nth-child({}) > button:nth-child(1)", top as u32)),
        }
    }

    fn target(day: u32, time: &str) -> TargetSpec {
        TargetSpec::new(
            NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            time.parse::<StartTime>().unwrap(),
        )
    }

    #[test]
    fn test_interval_bounded_by_next_header() {
        let headers = vec![header("18 feb.", 100.0), header("19 feb.", 500.0)];

        assert_eq!(day_interval(&headers, "18 feb."), Some((100.0, 500.0)));
        assert_eq!(day_interval(&headers, "19 feb."), Some((500.0, f64::INFINITY)));
        assert_eq!(day_interval(&headers, "20 feb."), None);
    }

    #[test]
    fn test_interval_skips_duplicate_header_position() {
        // Sticky duplicate of the active header at effectively the same offset
        let headers = vec![header("18 feb.", 100.0), header("18 feb.", 100.5), header("19 feb.", 500.0)];

        assert_eq!(day_interval(&headers, "18 feb."), Some((100.0, 500.0)));
    }

    #[test]
    fn test_partition_is_total_and_non_overlapping() {
        let headers = vec![header("17 feb.", 0.0), header("18 feb.", 300.0), header("19 feb.", 700.0)];
        let row_tops = [10.0, 120.0, 299.0, 300.5, 450.0, 699.0, 700.0, 1500.0];

        for &top in &row_tops {
            let owners: Vec<&str> = ["17 feb.", "18 feb.", "19 feb."]
                .iter()
                .filter(|day| {
                    let (lower, upper) = day_interval(&headers, day).unwrap();
                    top >= lower && top < upper
                })
                .copied()
                .collect();

            assert_eq!(owners.len(), 1, "row at {} owned by {:?}", top, owners);
        }
    }

    #[test]
    fn test_rows_assigned_by_geometry() {
        // Headers at 100 and 500: the first day owns exactly rows 120 and 140
        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0), header("19 feb.", 500.0)],
            rows: vec![
                row(120.0, "7:30-8:15", None, "Book"),
                row(140.0, "7:30-8:15", None, "Book"),
                row(480.0, "9:00-10:00", None, "Book"),
                row(520.0, "7:30-8:15", None, "Book"),
            ],
        };

        let found = locate_slot(&snapshot, &target(18, "7:30")).unwrap();
        assert_eq!(found.top, 120.0);

        let found = locate_slot(&snapshot, &target(19, "7:30")).unwrap();
        assert_eq!(found.top, 520.0);
    }

    #[test]
    fn test_leading_zero_is_a_real_mismatch() {
        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0)],
            rows: vec![row(120.0, "07:30-08:15", None, "Book")],
        };

        let err = locate_slot(&snapshot, &target(18, "7:30"));
        assert!(matches!(err, Err(BookingError::SlotNotFound { .. })));

        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0)],
            rows: vec![row(120.0, "7:30-8:15", None, "Book")],
        };

        assert!(locate_slot(&snapshot, &target(18, "7:30")).is_ok());
    }

    #[test]
    fn test_name_filter_is_case_insensitive_substring() {
        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0)],
            rows: vec![
                row(120.0, "7:30-8:15", Some("Spinning 45"), "Book"),
                row(140.0, "7:30-8:15", Some("Hot Yoga Flow"), "Book"),
            ],
        };

        let found = locate_slot(&snapshot, &target(18, "7:30").with_activity("yoga")).unwrap();
        assert_eq!(found.top, 140.0);

        let err = locate_slot(&snapshot, &target(18, "7:30").with_activity("pilates"));
        assert!(matches!(err, Err(BookingError::SlotNotFound { .. })));
    }

    #[test]
    fn test_name_filter_skips_rows_without_name() {
        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0)],
            rows: vec![row(120.0, "7:30-8:15", None, "Book")],
        };

        let err = locate_slot(&snapshot, &target(18, "7:30").with_activity("yoga"));
        assert!(matches!(err, Err(BookingError::SlotNotFound { .. })));
    }

    #[test]
    fn test_unbookable_rows_are_skipped() {
        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0)],
            rows: vec![
                row(120.0, "7:30-8:15", None, "Fullt"),
                row(140.0, "7:30-8:15", None, "Venteliste"),
            ],
        };

        // Same start time; button-label filtering breaks the tie
        let found = locate_slot(&snapshot, &target(18, "7:30")).unwrap();
        assert_eq!(found.top, 140.0);
    }

    #[test]
    fn test_first_in_document_order_wins() {
        let snapshot = ScheduleSnapshot {
            headers: vec![
                header("18 feb.", 50.0),
                header("19 feb.", 400.0),
                header("20 feb.", 900.0),
            ],
            rows: vec![
                row(420.0, "16:00-17:00", None, "Book"),
                row(430.0, "16:00-17:00", None, "Venteliste"),
            ],
        };

        let found = locate_slot(&snapshot, &target(19, "16:00")).unwrap();
        assert_eq!(found.top, 420.0);
        assert_eq!(found.action_label(), crate::schedule::ActionLabel::Book);
    }

    #[test]
    fn test_already_booked_row_falls_through_to_waitlist() {
        let snapshot = ScheduleSnapshot {
            headers: vec![
                header("18 feb.", 50.0),
                header("19 feb.", 400.0),
                header("20 feb.", 900.0),
            ],
            rows: vec![
                row(420.0, "16:00-17:00", None, "Avbook"),
                row(430.0, "16:00-17:00", None, "Venteliste"),
            ],
        };

        let found = locate_slot(&snapshot, &target(19, "16:00")).unwrap();
        assert_eq!(found.top, 430.0);
        assert_eq!(found.action_label(), crate::schedule::ActionLabel::Waitlist);
    }

    #[test]
    fn test_missing_day_header() {
        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0)],
            rows: vec![row(120.0, "7:30-8:15", None, "Book")],
        };

        let err = locate_slot(&snapshot, &target(19, "7:30"));
        match err {
            Err(BookingError::DayNotFound { day }) => assert_eq!(day, "19 feb."),
            other => panic!("Expected DayNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_of_later_day_never_match() {
        let snapshot = ScheduleSnapshot {
            headers: vec![header("18 feb.", 100.0), header("19 feb.", 500.0)],
            rows: vec![row(520.0, "7:30-8:15", None, "Book")],
        };

        // The row exists, but belongs to the next day's interval
        let err = locate_slot(&snapshot, &target(18, "7:30"));
        assert!(matches!(err, Err(BookingError::SlotNotFound { .. })));
    }
}
