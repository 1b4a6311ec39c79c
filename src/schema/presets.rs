//! Built-in choices offered by the manual format configuration flow.

use crate::schema::model::{FieldTag, SchemaDocument};

/// Field orders selectable from the menu
pub const FIELD_ORDER_PRESETS: [[FieldTag; 3]; 3] = [
    [FieldTag::Date, FieldTag::Level, FieldTag::Message],
    [FieldTag::Level, FieldTag::Date, FieldTag::Message],
    [FieldTag::Message, FieldTag::Date, FieldTag::Level],
];

/// Separators selectable from the menu
pub const SEPARATOR_PRESETS: [&str; 5] = [" | ", "[]", "{}", "()", " / "];

/// Date formats selectable from the menu
pub const DATE_FORMAT_PRESETS: [&str; 3] = [
    "yyyy-MM-dd HH:mm:ss",
    "dd.MM.yyyy HH:mm",
    "MM/dd/yyyy HH:mm:ss",
];

/// Contents written to the default schema file when it does not exist yet
pub const DEFAULT_SCHEMA_JSON: &str = r#"{
  "fieldsOrder": [
    "Date",
    "Level",
    "Message"
  ],
  "separator": "[]",
  "dateFormat": "yyyy-MM-dd HH:mm:ss"
}
"#;

/// Render a field order the way menus display it: `Date, Level, Message`
pub fn field_order_label(order: &[FieldTag]) -> String {
    order
        .iter()
        .map(|tag| tag.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Starting point of the manual configuration draft
pub fn initial_document() -> SchemaDocument {
    SchemaDocument {
        fields_order: FIELD_ORDER_PRESETS[0].to_vec(),
        separator: SEPARATOR_PRESETS[1].to_string(),
        date_format: DATE_FORMAT_PRESETS[0].to_string(),
    }
}
