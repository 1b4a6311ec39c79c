//! Filter keeping records whose level is in a configured set.

use crate::record::LogRecord;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelFilter {
    levels: HashSet<String>,
}

impl LevelFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a comma-separated list of levels, e.g. `INFO, ERROR`.
    ///
    /// Labels are trimmed and blank entries dropped.
    pub fn configure(&mut self, input: &str) {
        self.levels = input
            .split(',')
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .map(str::to_string)
            .collect();
    }

    pub fn levels(&self) -> &HashSet<String> {
        &self.levels
    }

    pub fn is_configured(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Keep matching records; an unconfigured filter keeps everything
    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        if !self.is_configured() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| self.levels.contains(record.level()))
            .cloned()
            .collect()
    }
}
