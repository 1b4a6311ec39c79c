//! Schema value types and the on-disk schema document.

use crate::schema::date_format::DateFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Semantic role of one field in a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldTag {
    Date,
    Level,
    Message,
}

impl FieldTag {
    pub const ALL: [FieldTag; 3] = [FieldTag::Date, FieldTag::Level, FieldTag::Message];

    pub fn label(self) -> &'static str {
        match self {
            FieldTag::Date => "Date",
            FieldTag::Level => "Level",
            FieldTag::Message => "Message",
        }
    }

    /// Case-insensitive lookup by label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three bracket pairs that switch the codec into bracket-extraction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketPair {
    Square,
    Curly,
    Round,
}

impl BracketPair {
    pub fn open(self) -> char {
        match self {
            BracketPair::Square => '[',
            BracketPair::Curly => '{',
            BracketPair::Round => '(',
        }
    }

    pub fn close(self) -> char {
        match self {
            BracketPair::Square => ']',
            BracketPair::Curly => '}',
            BracketPair::Round => ')',
        }
    }

    /// Recognize `[]`, `{}` or `()`, ignoring surrounding whitespace
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "[]" => Some(BracketPair::Square),
            "{}" => Some(BracketPair::Curly),
            "()" => Some(BracketPair::Round),
            _ => None,
        }
    }

    pub fn wrap(self, value: &str) -> String {
        format!("{}{}{}", self.open(), value, self.close())
    }
}

/// How fields are delimited within a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Separator {
    Brackets(BracketPair),
    /// Raw separator text, surrounding whitespace included
    Literal(String),
}

impl Separator {
    pub fn parse(raw: &str) -> Self {
        match BracketPair::parse(raw) {
            Some(pair) => Separator::Brackets(pair),
            None => Separator::Literal(raw.to_string()),
        }
    }

    /// Text form as stored in schema files
    pub fn as_document_value(&self) -> String {
        match self {
            Separator::Brackets(pair) => format!("{}{}", pair.open(), pair.close()),
            Separator::Literal(raw) => raw.clone(),
        }
    }
}

/// Reasons a schema document cannot become a [`Schema`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("separator is empty")]
    BlankSeparator,

    #[error("date format is empty")]
    BlankDateFormat,

    #[error("field order is empty")]
    EmptyFieldOrder,

    #[error("date format '{pattern}' is not usable: {reason}")]
    DatePattern { pattern: String, reason: String },
}

/// Schema file contents, exactly as serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "fieldsOrder", default)]
    pub fields_order: Vec<FieldTag>,

    #[serde(default)]
    pub separator: String,

    #[serde(rename = "dateFormat", default)]
    pub date_format: String,
}

/// The validated field layout used by the decoder and encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    field_order: Vec<FieldTag>,
    separator: Separator,
    date_format: DateFormat,
}

impl Schema {
    pub fn new(
        field_order: Vec<FieldTag>,
        separator: &str,
        date_pattern: &str,
    ) -> Result<Self, SchemaViolation> {
        if separator.trim().is_empty() {
            return Err(SchemaViolation::BlankSeparator);
        }
        if field_order.is_empty() {
            return Err(SchemaViolation::EmptyFieldOrder);
        }
        let date_format = DateFormat::new(date_pattern)?;

        Ok(Self {
            field_order,
            separator: Separator::parse(separator),
            date_format,
        })
    }

    pub fn field_order(&self) -> &[FieldTag] {
        &self.field_order
    }

    /// Position of a tag within the field order
    pub fn position_of(&self, tag: FieldTag) -> Option<usize> {
        self.field_order.iter().position(|&candidate| candidate == tag)
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn to_document(&self) -> SchemaDocument {
        SchemaDocument {
            fields_order: self.field_order.clone(),
            separator: self.separator.as_document_value(),
            date_format: self.date_format.pattern().to_string(),
        }
    }
}

impl TryFrom<SchemaDocument> for Schema {
    type Error = SchemaViolation;

    fn try_from(document: SchemaDocument) -> Result<Self, Self::Error> {
        Schema::new(
            document.fields_order,
            &document.separator,
            &document.date_format,
        )
    }
}

impl TryFrom<&SchemaDocument> for Schema {
    type Error = SchemaViolation;

    fn try_from(document: &SchemaDocument) -> Result<Self, Self::Error> {
        Schema::new(
            document.fields_order.clone(),
            &document.separator,
            &document.date_format,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_detection() {
        assert_eq!(
            Separator::parse("[]"),
            Separator::Brackets(BracketPair::Square)
        );
        assert_eq!(
            Separator::parse(" {} "),
            Separator::Brackets(BracketPair::Curly)
        );
        assert_eq!(
            Separator::parse("()"),
            Separator::Brackets(BracketPair::Round)
        );
        assert_eq!(Separator::parse(" | "), Separator::Literal(" | ".to_string()));
        assert_eq!(Separator::parse("[)"), Separator::Literal("[)".to_string()));
    }

    #[test]
    fn test_document_deserializes_wire_names() {
        let json = r#"{"fieldsOrder":["Level","Date","Message"],"separator":"|","dateFormat":"yyyy-MM-dd HH:mm:ss"}"#;
        let document: SchemaDocument = serde_json::from_str(json).unwrap();
        assert_eq!(
            document.fields_order,
            vec![FieldTag::Level, FieldTag::Date, FieldTag::Message]
        );

        let schema = Schema::try_from(document).unwrap();
        assert_eq!(schema.position_of(FieldTag::Date), Some(1));
        assert_eq!(schema.separator(), &Separator::Literal("|".to_string()));
    }

    #[test]
    fn test_document_rejects_unknown_tag() {
        let json = r#"{"fieldsOrder":["Date","Severity"],"separator":"|","dateFormat":"yyyy"}"#;
        assert!(serde_json::from_str::<SchemaDocument>(json).is_err());
    }

    #[test]
    fn test_missing_values_are_violations() {
        let document: SchemaDocument =
            serde_json::from_str(r#"{"fieldsOrder":["Date","Level","Message"],"dateFormat":"yyyy"}"#)
                .unwrap();
        assert_eq!(
            Schema::try_from(document),
            Err(SchemaViolation::BlankSeparator)
        );

        let document = SchemaDocument {
            fields_order: vec![],
            separator: "|".to_string(),
            date_format: "yyyy".to_string(),
        };
        assert_eq!(
            Schema::try_from(document),
            Err(SchemaViolation::EmptyFieldOrder)
        );

        let document = SchemaDocument {
            fields_order: FieldTag::ALL.to_vec(),
            separator: "|".to_string(),
            date_format: " ".to_string(),
        };
        assert_eq!(
            Schema::try_from(document),
            Err(SchemaViolation::BlankDateFormat)
        );
    }

    #[test]
    fn test_schema_document_round_trip() {
        let schema = Schema::new(FieldTag::ALL.to_vec(), " {} ", "dd.MM.yyyy HH:mm").unwrap();
        let document = schema.to_document();
        assert_eq!(document.separator, "{}");
        assert_eq!(Schema::try_from(document).unwrap(), schema);
    }

    #[test]
    fn test_field_tag_labels() {
        assert_eq!(FieldTag::from_label(" level "), Some(FieldTag::Level));
        assert_eq!(FieldTag::from_label("unknown"), None);
        assert_eq!(FieldTag::Message.to_string(), "Message");
    }
}
