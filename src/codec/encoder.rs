//! Rendering records back to text.
//!
//! Storage form follows the schema's field order so it can be decoded again
//! with the same schema. Display form has a fixed layout meant for reading.

use crate::record::LogRecord;
use crate::schema::{FieldTag, Schema, Separator};

/// Width of the horizontal rule framing records in display form
pub const RULE_WIDTH: usize = 50;

/// The horizontal rule used by display form
pub fn horizontal_rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Encode records one per line, laid out by the schema's field order.
///
/// With a bracket separator every slot except the last is wrapped and slots
/// are joined with a space; otherwise slots are joined with the separator.
pub fn encode_for_storage(records: &[LogRecord], schema: &Schema) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&encode_storage_line(record, schema));
        output.push('\n');
    }
    output
}

/// Encode one record without the trailing newline
pub fn encode_storage_line(record: &LogRecord, schema: &Schema) -> String {
    let slots: Vec<String> = schema
        .field_order()
        .iter()
        .map(|&tag| match tag {
            FieldTag::Date => schema.date_format().format(&record.timestamp()),
            FieldTag::Level => record.level().to_string(),
            FieldTag::Message => record.message().to_string(),
        })
        .collect();

    match schema.separator() {
        Separator::Brackets(pair) => {
            let last = slots.len().saturating_sub(1);
            slots
                .iter()
                .enumerate()
                .map(|(index, slot)| {
                    if index < last {
                        pair.wrap(slot)
                    } else {
                        slot.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        }
        Separator::Literal(separator) => slots.join(separator.as_str()),
    }
}

/// Encode records for the console: source, timestamp and level on one line,
/// the message on the next, each record framed by horizontal rules.
pub fn encode_for_display(records: &[LogRecord], schema: &Schema) -> String {
    let rule = horizontal_rule();
    let mut output = String::new();
    output.push_str(&rule);
    output.push('\n');

    for record in records {
        let timestamp = schema.date_format().format(&record.timestamp());
        let header = [record.source_name(), timestamp.as_str(), record.level()];
        let header = match schema.separator() {
            Separator::Brackets(pair) => header
                .iter()
                .map(|value| pair.wrap(value))
                .collect::<Vec<_>>()
                .join(" "),
            Separator::Literal(separator) => header.join(separator.as_str()),
        };

        output.push_str(&header);
        output.push('\n');
        output.push_str(record.message());
        output.push('\n');
        output.push_str(&rule);
        output.push('\n');
    }

    output
}
