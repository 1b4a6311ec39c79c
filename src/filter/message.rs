//! Filter keeping records whose message contains a keyword.

use crate::record::LogRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    keyword: String,
}

impl MessageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Case-sensitive substring match; a blank keyword keeps everything
    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        if self.keyword.trim().is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| record.message().contains(self.keyword.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn records(messages: &[&str]) -> Vec<LogRecord> {
        messages
            .iter()
            .map(|message| LogRecord::new(NaiveDateTime::MIN, "INFO", *message, "app.log"))
            .collect()
    }

    #[test]
    fn test_substring_match_is_case_sensitive() {
        let mut filter = MessageFilter::new();
        filter.configure("disk");
        let kept = filter.apply(&records(&["disk full", "Disk ok", "no space on disk"]));
        let messages: Vec<&str> = kept.iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["disk full", "no space on disk"]);
    }

    #[test]
    fn test_blank_keyword_is_identity() {
        let input = records(&["a", "b"]);
        let mut filter = MessageFilter::new();
        assert_eq!(filter.apply(&input), input);

        filter.configure("   ");
        assert_eq!(filter.apply(&input), input);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut filter = MessageFilter::new();
        filter.configure("a");
        let once = filter.apply(&records(&["abc", "xyz", "cab"]));
        assert_eq!(filter.apply(&once), once);
    }
}
