//! Summary statistics over a record collection.

use crate::record::LogRecord;
use crate::schema::Schema;
use std::fmt;

/// Aggregates computed once over a collection
#[derive(Debug, Clone, PartialEq)]
pub struct LogStatistics {
    pub total: usize,
    /// Level label and count, in the order levels first appear
    pub levels: Vec<(String, usize)>,
    /// First record holding the minimum timestamp
    pub earliest: Option<LogRecord>,
    /// First record holding the maximum timestamp
    pub latest: Option<LogRecord>,
    /// Mean message length in characters, 0.0 for an empty collection
    pub average_message_length: f64,
}

impl LogStatistics {
    pub fn compute(records: &[LogRecord]) -> Self {
        let mut levels: Vec<(String, usize)> = Vec::new();
        for record in records {
            match levels.iter_mut().find(|(level, _)| level == record.level()) {
                Some((_, count)) => *count += 1,
                None => levels.push((record.level().to_string(), 1)),
            }
        }

        // min_by_key keeps the first minimum; max_by_key keeps the last maximum,
        // so the latest record is searched from the back
        let earliest = records.iter().min_by_key(|r| r.timestamp()).cloned();
        let latest = records.iter().rev().max_by_key(|r| r.timestamp()).cloned();

        let average_message_length = if records.is_empty() {
            0.0
        } else {
            let total_chars: usize = records.iter().map(LogRecord::message_len).sum();
            total_chars as f64 / records.len() as f64
        };

        Self {
            total: records.len(),
            levels,
            earliest,
            latest,
            average_message_length,
        }
    }

    /// Share of `count` in the whole collection, as a percentage
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }

    /// Text lines for the per-level section, with percentages
    pub fn level_lines(&self) -> Vec<String> {
        self.levels
            .iter()
            .map(|(level, count)| {
                format!("{level}: {count} ({:.1}%)", self.percentage(*count))
            })
            .collect()
    }

    /// One-line description of a boundary record, timestamps in the schema's format
    pub fn describe_record(record: &LogRecord, schema: &Schema) -> String {
        format!(
            "{} [{}] {} ({})",
            schema.date_format().format(&record.timestamp()),
            record.level(),
            record.message(),
            record.source_name()
        )
    }

    /// Plain-text report, as written to output files
    pub fn render_report(&self, schema: &Schema) -> String {
        let mut report = String::new();
        // Writing to a String cannot fail
        let _ = self.write_report(&mut report, schema);
        report
    }

    /// Write the plain-text report to any formatter sink
    pub fn write_report(&self, out: &mut impl fmt::Write, schema: &Schema) -> fmt::Result {
        writeln!(out, "Log statistics")?;
        writeln!(out, "Total records: {}", self.total)?;

        writeln!(out)?;
        writeln!(out, "Records by level:")?;
        if self.levels.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for line in self.level_lines() {
            writeln!(out, "  {line}")?;
        }

        let describe = |record: &Option<LogRecord>| match record {
            Some(record) => Self::describe_record(record, schema),
            None => "-".to_string(),
        };
        writeln!(out)?;
        writeln!(out, "Earliest: {}", describe(&self.earliest))?;
        writeln!(out, "Latest: {}", describe(&self.latest))?;

        writeln!(
            out,
            "Average message length: {:.2} characters",
            self.average_message_length
        )
    }
}
