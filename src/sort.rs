//! Ordering of record collections.
//!
//! Sorting never touches its input: every call returns a new collection.
//! All orderings are stable, including descending ones, so records with equal
//! keys keep their relative order.

use crate::record::LogRecord;
use std::cmp::Ordering;
use std::fmt;

/// Field a collection can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Timestamp
    Date,
    /// Level label, ordinal string comparison
    Level,
    /// Message length in characters
    Message,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Level, SortKey::Message];

    /// Parse a key name, ignoring case and surrounding whitespace
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "date" => Some(SortKey::Date),
            "level" => Some(SortKey::Level),
            "message" => Some(SortKey::Message),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Level => "level",
            SortKey::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Date => "By date",
            SortKey::Level => "By level",
            SortKey::Message => "By message length",
        }
    }

    fn compare(self, a: &LogRecord, b: &LogRecord) -> Ordering {
        match self {
            SortKey::Date => a.timestamp().cmp(&b.timestamp()),
            SortKey::Level => a.level().cmp(b.level()),
            SortKey::Message => a.message_len().cmp(&b.message_len()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

/// Return a copy of `records` ordered by `key` in `direction`
pub fn sort_records(records: &[LogRecord], key: SortKey, direction: SortDirection) -> Vec<LogRecord> {
    let mut sorted = records.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| key.compare(a, b)),
        // Reversed comparator, so ties stay in input order
        SortDirection::Descending => sorted.sort_by(|a, b| key.compare(b, a)),
    }
    sorted
}

/// Sort ascending by a key name; an unknown name returns the records unchanged
pub fn sort_ascending(records: &[LogRecord], key: &str) -> Vec<LogRecord> {
    sort_by_name(records, key, SortDirection::Ascending)
}

/// Sort descending by a key name; an unknown name returns the records unchanged
pub fn sort_descending(records: &[LogRecord], key: &str) -> Vec<LogRecord> {
    sort_by_name(records, key, SortDirection::Descending)
}

fn sort_by_name(records: &[LogRecord], key: &str, direction: SortDirection) -> Vec<LogRecord> {
    match SortKey::parse(key) {
        Some(key) => sort_records(records, key, direction),
        None => {
            log::debug!("Unknown sort key '{}', leaving order unchanged", key);
            records.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn messages(records: &[LogRecord]) -> Vec<&str> {
        records.iter().map(|r| r.message()).collect()
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(SortKey::parse("DATE"), Some(SortKey::Date));
        assert_eq!(SortKey::parse(" Level "), Some(SortKey::Level));
        assert_eq!(SortKey::parse("message"), Some(SortKey::Message));
        assert_eq!(SortKey::parse("size"), None);
    }

    #[test]
    fn test_sort_by_date() {
        let input = vec![
            LogRecord::new(at(12), "INFO", "noon", "a.log"),
            LogRecord::new(at(9), "INFO", "morning", "a.log"),
            LogRecord::new(at(18), "INFO", "evening", "b.log"),
        ];
        assert_eq!(messages(&sort_ascending(&input, "date")), vec!["morning", "noon", "evening"]);
        assert_eq!(messages(&sort_descending(&input, "Date")), vec!["evening", "noon", "morning"]);
        // input untouched
        assert_eq!(messages(&input), vec!["noon", "morning", "evening"]);
    }

    #[test]
    fn test_sort_by_message_length_is_stable() {
        let input = vec![
            LogRecord::new(at(1), "INFO", "bb", "a.log"),
            LogRecord::new(at(2), "INFO", "a", "a.log"),
            LogRecord::new(at(3), "INFO", "cc", "a.log"),
        ];
        assert_eq!(messages(&sort_ascending(&input, "message")), vec!["a", "bb", "cc"]);
        assert_eq!(messages(&sort_descending(&input, "message")), vec!["bb", "cc", "a"]);
    }

    #[test]
    fn test_message_length_counts_characters() {
        let input = vec![
            LogRecord::new(at(1), "INFO", "ééé", "a.log"),
            LogRecord::new(at(2), "INFO", "abcd", "a.log"),
        ];
        assert_eq!(messages(&sort_ascending(&input, "message")), vec!["ééé", "abcd"]);
    }

    #[test]
    fn test_sort_by_level_is_ordinal() {
        let input = vec![
            LogRecord::new(at(1), "WARN", "w", "a.log"),
            LogRecord::new(at(2), "ERROR", "e", "a.log"),
            LogRecord::new(at(3), "INFO", "i", "a.log"),
            LogRecord::new(at(4), "debug", "d", "a.log"),
        ];
        assert_eq!(messages(&sort_ascending(&input, "level")), vec!["e", "i", "w", "d"]);
    }

    #[test]
    fn test_equal_keys_keep_order_in_both_directions() {
        let input: Vec<LogRecord> = ["first", "second", "third"]
            .into_iter()
            .map(|m| LogRecord::new(at(5), "INFO", m, "a.log"))
            .collect();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            for key in SortKey::ALL {
                if key == SortKey::Message {
                    continue;
                }
                let sorted = sort_records(&input, key, direction);
                assert_eq!(messages(&sorted), vec!["first", "second", "third"]);
            }
        }
    }

    #[test]
    fn test_unknown_key_returns_unchanged() {
        let input = vec![
            LogRecord::new(at(2), "INFO", "b", "a.log"),
            LogRecord::new(at(1), "INFO", "a", "a.log"),
        ];
        assert_eq!(sort_ascending(&input, "size"), input);
        assert_eq!(sort_descending(&input, ""), input);
        assert!(sort_ascending(&[], "date").is_empty());
    }
}
