//! Schema-driven decoding of log text into [`LogRecord`]s.

use crate::codec::tokenizer::Tokenizer;
use crate::error::{LoglensError, Result};
use crate::record::LogRecord;
use crate::schema::{FieldTag, Schema};
use log::{debug, warn};

/// Raw text of one input together with its provenance tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    pub source_name: String,
    pub text: String,
}

impl SourceBlock {
    pub fn new(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            text: text.into(),
        }
    }

    /// Split a raw block whose first line is the provenance tag
    pub fn from_raw(raw: &str) -> Self {
        match raw.split_once('\n') {
            Some((header, body)) => Self::new(header.trim_end_matches('\r'), body),
            None => Self::new(raw.trim_end_matches('\r'), ""),
        }
    }

    /// Inverse of [`SourceBlock::from_raw`]
    pub fn to_raw(&self) -> String {
        format!("{}\n{}", self.source_name, self.text)
    }
}

/// Records decoded from one or more blocks plus every rejected line.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    pub records: Vec<LogRecord>,
    /// `MalformedLogLine` errors in input order
    pub rejected: Vec<LoglensError>,
}

impl DecodeOutcome {
    pub fn append(&mut self, mut other: DecodeOutcome) {
        self.records.append(&mut other.records);
        self.rejected.append(&mut other.rejected);
    }
}

/// Decodes lines with one schema.
///
/// The tokenizer is built once and reused for every line.
#[derive(Debug)]
pub struct Decoder<'a> {
    schema: &'a Schema,
    tokenizer: Tokenizer,
}

impl<'a> Decoder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            tokenizer: Tokenizer::new(schema.separator()),
        }
    }

    /// Decode every non-blank line of `text`, tagging records with `source_name`.
    ///
    /// Malformed lines are logged, collected and skipped.
    pub fn decode(&self, text: &str, source_name: &str) -> DecodeOutcome {
        let mut outcome = DecodeOutcome::default();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match self.decode_line(line, source_name, index + 1) {
                Ok(record) => outcome.records.push(record),
                Err(err) => {
                    warn!("{err}");
                    outcome.rejected.push(err);
                }
            }
        }

        debug!(
            "Decoded {} records from {} ({} rejected)",
            outcome.records.len(),
            source_name,
            outcome.rejected.len()
        );
        outcome
    }

    /// Decode a single line; `line_number` is only used for error reporting
    pub fn decode_line(
        &self,
        line: &str,
        source_name: &str,
        line_number: usize,
    ) -> Result<LogRecord> {
        let malformed =
            |reason: String| LoglensError::malformed_line(source_name, line_number, reason);

        let field_count = self.schema.field_order().len();
        let tokens = self
            .tokenizer
            .tokenize(line, field_count)
            .map_err(|err| malformed(err.to_string()))?;

        if tokens.len() != field_count {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                field_count,
                tokens.len()
            )));
        }

        let position = |tag: FieldTag| {
            self.schema
                .position_of(tag)
                .ok_or_else(|| malformed(format!("field order has no {tag} field")))
        };

        let date_token = tokens[position(FieldTag::Date)?].as_str();
        let level = tokens[position(FieldTag::Level)?].as_str();
        let message = tokens[position(FieldTag::Message)?].as_str();

        let timestamp = self.schema.date_format().parse(date_token).map_err(|err| {
            malformed(format!(
                "date '{}' does not match '{}': {}",
                date_token,
                self.schema.date_format().pattern(),
                err
            ))
        })?;

        if level.trim().is_empty() {
            return Err(malformed("level is empty".to_string()));
        }

        Ok(LogRecord::new(timestamp, level, message, source_name))
    }
}

/// Decode the data lines of one input
pub fn decode(text: &str, source_name: &str, schema: &Schema) -> DecodeOutcome {
    Decoder::new(schema).decode(text, source_name)
}

/// Decode a raw block whose first line is the provenance tag
pub fn decode_raw_block(raw: &str, schema: &Schema) -> DecodeOutcome {
    let block = SourceBlock::from_raw(raw);
    decode(&block.text, &block.source_name, schema)
}

/// Decode several blocks, preserving block order then line order
pub fn decode_blocks(blocks: &[SourceBlock], schema: &Schema) -> DecodeOutcome {
    let decoder = Decoder::new(schema);
    let mut outcome = DecodeOutcome::default();
    for block in blocks {
        outcome.append(decoder.decode(&block.text, &block.source_name));
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn schema(order: [FieldTag; 3], separator: &str) -> Schema {
        Schema::new(order.to_vec(), separator, "yyyy-MM-dd HH:mm:ss").unwrap()
    }

    const LDM: [FieldTag; 3] = [FieldTag::Level, FieldTag::Date, FieldTag::Message];

    #[test]
    fn test_decode_literal_line() {
        let outcome = decode("ERROR|2024-01-01 10:00:00|disk full", "app.log", &schema(LDM, "|"));
        assert!(outcome.rejected.is_empty());
        assert_eq!(
            outcome.records,
            vec![LogRecord::new(ts(10, 0, 0), "ERROR", "disk full", "app.log")]
        );
    }

    #[test]
    fn test_decode_bracket_line() {
        let outcome = decode(
            "[ERROR] [2024-01-01 10:00:00] disk full",
            "app.log",
            &schema(LDM, "[]"),
        );
        assert_eq!(
            outcome.records,
            vec![LogRecord::new(ts(10, 0, 0), "ERROR", "disk full", "app.log")]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped_silently() {
        let text = "\nERROR|2024-01-01 10:00:00|a\n   \n\r\nINFO|2024-01-01 11:00:00|b\n";
        let outcome = decode(text, "app.log", &schema(LDM, "|"));
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.records.len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "ERROR|2024-01-01 10:00:00|a\r\nINFO|2024-01-01 11:00:00|b\r\n";
        let outcome = decode(text, "app.log", &schema(LDM, "|"));
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].message(), "a");
    }

    #[test]
    fn test_malformed_lines_are_reported_and_skipped() {
        let text = "ERROR|2024-01-01 10:00:00|ok\n\
                    ERROR|not a date|bad date\n\
                    ERROR|2024-01-01 10:00:00\n\
                    ERROR|2024-01-01 10:00:00|too|many\n\
                    |2024-01-01 10:00:00|no level\n\
                    INFO|2024-01-01 12:00:00|ok again";
        let outcome = decode(text, "app.log", &schema(LDM, "|"));

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.rejected.len(), 4);
        let line_numbers: Vec<usize> = outcome
            .rejected
            .iter()
            .map(|err| match err {
                LoglensError::MalformedLogLine { line_number, .. } => *line_number,
                other => panic!("Expected MalformedLogLine, got {other:?}"),
            })
            .collect();
        assert_eq!(line_numbers, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_bracket_count_mismatch_is_malformed() {
        let brackets = schema(LDM, "[]");
        let outcome = decode("[ERROR] disk full", "app.log", &brackets);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.rejected.len(), 1);

        let outcome = decode(
            "[ERROR] [2024-01-01 10:00:00] disk [sda] full",
            "app.log",
            &brackets,
        );
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.rejected.len(), 1);
    }

    #[test]
    fn test_missing_tag_in_field_order_is_malformed() {
        let partial = Schema::new(
            vec![FieldTag::Date, FieldTag::Level, FieldTag::Level],
            "|",
            "yyyy-MM-dd HH:mm:ss",
        )
        .unwrap();
        let outcome = decode("2024-01-01 10:00:00|INFO|INFO", "app.log", &partial);
        assert!(outcome.records.is_empty());
        assert!(matches!(
            &outcome.rejected[0],
            LoglensError::MalformedLogLine { reason, .. } if reason.contains("Message")
        ));
    }

    #[test]
    fn test_raw_block_first_line_is_provenance() {
        let raw = "logs/a.log\nERROR|2024-01-01 10:00:00|disk full\n";
        let outcome = decode_raw_block(raw, &schema(LDM, "|"));
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].source_name(), "logs/a.log");
    }

    #[test]
    fn test_decode_blocks_preserves_order() {
        let blocks = vec![
            SourceBlock::new("b.log", "INFO|2024-01-01 11:00:00|second\nWARN|2024-01-01 09:00:00|third"),
            SourceBlock::new("a.log", "ERROR|2024-01-01 10:00:00|fourth"),
        ];
        let outcome = decode_blocks(&blocks, &schema(LDM, "|"));
        let messages: Vec<&str> = outcome.records.iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["second", "third", "fourth"]);
        assert_eq!(outcome.records[2].source_name(), "a.log");
    }

    #[test]
    fn test_source_block_raw_round_trip() {
        let block = SourceBlock::new("x.log", "line one\nline two");
        assert_eq!(SourceBlock::from_raw(&block.to_raw()), block);
        assert_eq!(SourceBlock::from_raw("only-header"), SourceBlock::new("only-header", ""));
    }
}
