//! Record filters.
//!
//! The three strategies share a two-step protocol: `configure` captures the
//! user's answers once, `apply` produces a new subsequence. [`LogFilter`]
//! dispatches over them by menu selection.

pub mod date_range;
pub mod level;
pub mod message;

pub use date_range::DateRangeFilter;
pub use level::LevelFilter;
pub use message::MessageFilter;

use crate::error::{LoglensError, Result};
use crate::record::LogRecord;
use crate::schema::DateFormat;

/// Which filter the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Level,
    DateRange,
    Message,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Level, FilterKind::DateRange, FilterKind::Message];

    /// Map a menu index to a filter kind
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Level => "By level",
            FilterKind::DateRange => "By date and time range",
            FilterKind::Message => "By keyword in message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    Level(LevelFilter),
    DateRange(DateRangeFilter),
    Message(MessageFilter),
}

impl LogFilter {
    /// An unconfigured filter of the given kind
    pub fn new(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Level => LogFilter::Level(LevelFilter::new()),
            FilterKind::DateRange => LogFilter::DateRange(DateRangeFilter::new()),
            FilterKind::Message => LogFilter::Message(MessageFilter::new()),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            LogFilter::Level(_) => FilterKind::Level,
            LogFilter::DateRange(_) => FilterKind::DateRange,
            LogFilter::Message(_) => FilterKind::Message,
        }
    }

    /// Questions to ask the user, one answer each, in order
    pub fn prompts(&self, date_format: &DateFormat) -> Vec<String> {
        match self {
            LogFilter::Level(_) => {
                vec!["Enter levels separated by commas (e.g. INFO,ERROR):".to_string()]
            }
            LogFilter::DateRange(_) => vec![
                format!("Enter the start date ({}):", date_format.pattern()),
                format!("Enter the end date ({}):", date_format.pattern()),
            ],
            LogFilter::Message(_) => vec!["Enter a keyword to search messages for:".to_string()],
        }
    }

    /// Capture the answers to [`LogFilter::prompts`].
    ///
    /// Missing answers count as empty input. Returns non-fatal problems.
    pub fn configure(&mut self, answers: &[String], date_format: &DateFormat) -> Vec<LoglensError> {
        let answer = |index: usize| answers.get(index).map(String::as_str).unwrap_or("");
        match self {
            LogFilter::Level(filter) => {
                filter.configure(answer(0));
                Vec::new()
            }
            LogFilter::DateRange(filter) => filter.configure(answer(0), answer(1), date_format),
            LogFilter::Message(filter) => {
                filter.configure(answer(0));
                Vec::new()
            }
        }
    }

    /// Apply the filter to a loaded collection.
    ///
    /// # Errors
    /// * `NullInput` when no collection is loaded (as opposed to an empty one)
    pub fn apply(&self, records: Option<&[LogRecord]>) -> Result<Vec<LogRecord>> {
        let records = records.ok_or(LoglensError::NullInput {
            what: "log records",
        })?;
        Ok(match self {
            LogFilter::Level(filter) => filter.apply(records),
            LogFilter::DateRange(filter) => filter.apply(records),
            LogFilter::Message(filter) => filter.apply(records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records() -> Vec<LogRecord> {
        let ts = |h| {
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        vec![
            LogRecord::new(ts(9), "ERROR", "disk full", "a.log"),
            LogRecord::new(ts(10), "INFO", "started", "a.log"),
            LogRecord::new(ts(11), "WARN", "disk slow", "b.log"),
        ]
    }

    fn format() -> DateFormat {
        DateFormat::new("yyyy-MM-dd HH:mm:ss").unwrap()
    }

    #[test]
    fn test_kind_from_menu_index() {
        assert_eq!(FilterKind::from_index(0), Some(FilterKind::Level));
        assert_eq!(FilterKind::from_index(2), Some(FilterKind::Message));
        assert_eq!(FilterKind::from_index(3), None);
        assert_eq!(LogFilter::new(FilterKind::DateRange).kind(), FilterKind::DateRange);
    }

    #[test]
    fn test_prompts_mention_date_pattern() {
        let prompts = LogFilter::new(FilterKind::DateRange).prompts(&format());
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("yyyy-MM-dd HH:mm:ss"));
    }

    #[test]
    fn test_configure_and_apply_each_kind() {
        let input = records();

        let mut level = LogFilter::new(FilterKind::Level);
        assert!(level.configure(&["ERROR, WARN".to_string()], &format()).is_empty());
        assert_eq!(level.apply(Some(input.as_slice())).unwrap().len(), 2);

        let mut range = LogFilter::new(FilterKind::DateRange);
        let answers = ["2024-01-01 10:00:00".to_string(), "2024-01-01 12:00:00".to_string()];
        assert!(range.configure(&answers, &format()).is_empty());
        assert_eq!(range.apply(Some(input.as_slice())).unwrap().len(), 2);

        let mut message = LogFilter::new(FilterKind::Message);
        message.configure(&["disk".to_string()], &format());
        assert_eq!(message.apply(Some(input.as_slice())).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_answers_leave_filter_unconfigured() {
        let input = records();
        let mut range = LogFilter::new(FilterKind::DateRange);
        let reports = range.configure(&[], &format());
        assert_eq!(reports.len(), 2);
        assert_eq!(range.apply(Some(input.as_slice())).unwrap(), input);
    }

    #[test]
    fn test_absent_collection_is_null_input() {
        let filter = LogFilter::new(FilterKind::Message);
        assert!(matches!(
            filter.apply(None),
            Err(LoglensError::NullInput { .. })
        ));
        assert!(filter.apply(Some(&[][..])).unwrap().is_empty());
    }

    #[test]
    fn test_filters_are_idempotent() {
        let input = records();
        for kind in FilterKind::ALL {
            let mut filter = LogFilter::new(kind);
            let answers = match kind {
                FilterKind::Level => vec!["INFO".to_string()],
                FilterKind::DateRange => vec![
                    "2024-01-01 09:30:00".to_string(),
                    "2024-01-01 11:00:00".to_string(),
                ],
                FilterKind::Message => vec!["disk".to_string()],
            };
            filter.configure(&answers, &format());
            let once = filter.apply(Some(input.as_slice())).unwrap();
            let twice = filter.apply(Some(once.as_slice())).unwrap();
            assert_eq!(once, twice);
        }
    }
}
