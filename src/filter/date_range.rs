//! Filter keeping records inside an inclusive timestamp range.

use crate::error::LoglensError;
use crate::record::LogRecord;
use crate::schema::DateFormat;
use chrono::NaiveDateTime;

/// Inclusive `[start, end]` range.
///
/// Both bounds start at `NaiveDateTime::MIN`; while they are equal the filter
/// keeps everything, so an unconfigured range never empties a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeFilter {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Default for DateRangeFilter {
    fn default() -> Self {
        Self {
            start: NaiveDateTime::MIN,
            end: NaiveDateTime::MIN,
        }
    }
}

impl DateRangeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Parse both bounds with the active date format.
    ///
    /// A bound that does not parse keeps its current value and is reported in
    /// the returned list instead of aborting.
    pub fn configure(
        &mut self,
        start_input: &str,
        end_input: &str,
        date_format: &DateFormat,
    ) -> Vec<LoglensError> {
        let mut reports = Vec::new();

        match date_format.parse(start_input.trim()) {
            Ok(start) => self.start = start,
            Err(err) => reports.push(bound_error("start", start_input, date_format, err)),
        }
        match date_format.parse(end_input.trim()) {
            Ok(end) => self.end = end,
            Err(err) => reports.push(bound_error("end", end_input, date_format, err)),
        }

        reports
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        if self.start == self.end {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| self.start <= record.timestamp() && record.timestamp() <= self.end)
            .cloned()
            .collect()
    }
}

fn bound_error(
    which: &str,
    input: &str,
    date_format: &DateFormat,
    err: chrono::ParseError,
) -> LoglensError {
    LoglensError::invalid_argument(format!(
        "{which} date '{}' does not match '{}' ({err}); keeping the default value",
        input.trim(),
        date_format.pattern()
    ))
}
