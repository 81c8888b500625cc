//! Ordering resolver.
//!
//! Screens with an explicit order come first, ascending. Screens without one
//! follow. Within each band the creation timestamp decides, oldest first, and
//! fully equal keys keep their input order.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{FlowType, Screen};

/// Sort key for a screen. Field order matters: the derived `Ord` is the ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ScreenKey {
    unordered: bool,
    order: Option<i64>,
    undated: bool,
    created: Option<DateTime<Utc>>,
}

fn screen_key(screen: &Screen) -> ScreenKey {
    let created = parse_timestamp(&screen.created_at);
    ScreenKey {
        unordered: screen.order.is_none(),
        order: screen.order,
        undated: created.is_none(),
        created,
    }
}

/// Parse a CMS timestamp: RFC 3339 first, then a bare `YYYY-MM-DD` at midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Sort screens in place. Stable.
pub fn sort_screens(screens: &mut [Screen]) {
    screens.sort_by_cached_key(screen_key);
}

/// Sort flow types by explicit order; unordered types go last in input order.
pub fn sort_flow_types(flow_types: &mut [FlowType]) {
    flow_types.sort_by_key(|ft| (ft.order.is_none(), ft.order));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{flow, ids, screen};

    fn ordered(id: &str, order: Option<i64>, created_at: &str) -> Screen {
        Screen {
            order,
            created_at: created_at.to_string(),
            ..screen(id)
        }
    }

    #[test]
    fn test_explicit_order_beats_timestamp() {
        let mut screens = vec![
            ordered("newer-unordered", None, "2024-01-01"),
            ordered("older-ordered", Some(3), "2023-01-01"),
        ];
        sort_screens(&mut screens);
        assert_eq!(ids(&screens), vec!["older-ordered", "newer-unordered"]);
    }

    #[test]
    fn test_ordered_screens_before_unordered_even_if_newer() {
        let mut screens = vec![
            ordered("a", None, "2020-01-01T00:00:00Z"),
            ordered("b", Some(10), "2025-06-01T00:00:00Z"),
            ordered("c", Some(1), "2025-06-02T00:00:00Z"),
        ];
        sort_screens(&mut screens);
        assert_eq!(ids(&screens), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_timestamp_breaks_ties() {
        let mut screens = vec![
            ordered("late", Some(1), "2024-03-01T10:00:00Z"),
            ordered("early", Some(1), "2024-03-01T09:00:00+00:00"),
            ordered("u2", None, "2024-02-01T00:00:00Z"),
            ordered("u1", None, "2024-01-01T00:00:00Z"),
        ];
        sort_screens(&mut screens);
        assert_eq!(ids(&screens), vec!["early", "late", "u1", "u2"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let mut screens = vec![
            ordered("first", Some(2), "2024-01-01"),
            ordered("second", Some(2), "2024-01-01"),
            ordered("third", Some(2), "2024-01-01"),
        ];
        sort_screens(&mut screens);
        assert_eq!(ids(&screens), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let mut screens = vec![
            ordered("a", None, "2024-05-01"),
            ordered("b", Some(5), "2024-01-01"),
            ordered("c", Some(5), "2023-01-01"),
            ordered("d", None, "not a date"),
            ordered("e", Some(-1), "2024-01-01"),
        ];
        sort_screens(&mut screens);
        let once = screens.clone();
        sort_screens(&mut screens);
        assert_eq!(screens, once);
        assert_eq!(ids(&once), vec!["e", "c", "b", "a", "d"]);
    }

    #[test]
    fn test_unparseable_timestamps_sort_last_within_band() {
        let mut screens = vec![
            ordered("garbage", None, ""),
            ordered("dated", None, "2024-01-01"),
        ];
        sort_screens(&mut screens);
        assert_eq!(ids(&screens), vec!["dated", "garbage"]);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-01T12:30:00.000Z").is_some());
        assert!(parse_timestamp("2024-01-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert_eq!(
            parse_timestamp("2024-01-01"),
            parse_timestamp("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_sort_flow_types() {
        let mut flow_types = vec![
            flow("Misc", None),
            flow("A", Some(2)),
            flow("B", Some(1)),
            flow("Other", None),
        ];
        sort_flow_types(&mut flow_types);
        let names: Vec<&str> = flow_types.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "Misc", "Other"]);
    }
}
