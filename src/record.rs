//! The typed log record produced by the decoder.

use chrono::NaiveDateTime;

/// One decoded log entry together with the source it came from.
///
/// Records are never mutated after decoding; filtering and sorting produce
/// new collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: NaiveDateTime,
    level: String,
    message: String,
    source_name: String,
}

impl LogRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        level: impl Into<String>,
        message: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level: level.into(),
            message: message.into(),
            source_name: source_name.into(),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Provenance tag, normally the path of the file the record was read from
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Message length in characters, used by sorting and statistics
    pub fn message_len(&self) -> usize {
        self.message.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_record_accessors() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let record = LogRecord::new(ts, "ERROR", "диск полон", "app.log");

        assert_eq!(record.timestamp(), ts);
        assert_eq!(record.level(), "ERROR");
        assert_eq!(record.message(), "диск полон");
        assert_eq!(record.source_name(), "app.log");
        assert_eq!(record.message_len(), 10);
    }
}
