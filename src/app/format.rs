//! The "Configure log format" flow: import, manual setup, reset, show.

use crate::app::batch::describe_schema;
use crate::app::menu::numbered;
use crate::error::{LoglensError, Result};
use crate::schema::presets::{
    field_order_label, initial_document, DATE_FORMAT_PRESETS, FIELD_ORDER_PRESETS,
    SEPARATOR_PRESETS,
};
use crate::schema::{Schema, SchemaDocument, SchemaStore};
use crate::ui::{BlockStyle, Prompter};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Import,
    Manual,
    Reset,
    Show,
}

impl FormatAction {
    pub const ALL: [FormatAction; 4] = [
        FormatAction::Import,
        FormatAction::Manual,
        FormatAction::Reset,
        FormatAction::Show,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatAction::Import => "Load a schema file",
            FormatAction::Manual => "Configure manually",
            FormatAction::Reset => "Reset to the default format",
            FormatAction::Show => "Show the active format",
        }
    }
}

/// Entries of the manual configuration menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCategory {
    FieldOrder,
    Separator,
    DateFormat,
    Save,
}

impl FormatCategory {
    pub const ALL: [FormatCategory; 4] = [
        FormatCategory::FieldOrder,
        FormatCategory::Separator,
        FormatCategory::DateFormat,
        FormatCategory::Save,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            FormatCategory::FieldOrder => "Field order",
            FormatCategory::Separator => "Separator",
            FormatCategory::DateFormat => "Date format",
            FormatCategory::Save => "Save current configuration",
        }
    }
}

/// Schema being assembled from presets, starting at the built-in layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDraft {
    document: SchemaDocument,
}

impl Default for FormatDraft {
    fn default() -> Self {
        Self {
            document: initial_document(),
        }
    }
}

impl FormatDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// Menu labels showing the current value of each category
    pub fn category_labels(&self) -> Vec<String> {
        FormatCategory::ALL
            .iter()
            .map(|&category| match category {
                FormatCategory::FieldOrder => format!(
                    "{}: {}",
                    category.title(),
                    field_order_label(&self.document.fields_order)
                ),
                FormatCategory::Separator => {
                    format!("{}: '{}'", category.title(), self.document.separator)
                }
                FormatCategory::DateFormat => {
                    format!("{}: {}", category.title(), self.document.date_format)
                }
                FormatCategory::Save => category.title().to_string(),
            })
            .collect()
    }

    /// Preset labels for a category; empty for `Save`
    pub fn options(category: FormatCategory) -> Vec<String> {
        match category {
            FormatCategory::FieldOrder => FIELD_ORDER_PRESETS
                .iter()
                .map(|order| field_order_label(order))
                .collect(),
            FormatCategory::Separator => SEPARATOR_PRESETS
                .iter()
                .map(|separator| format!("'{separator}'"))
                .collect(),
            FormatCategory::DateFormat => {
                DATE_FORMAT_PRESETS.iter().map(|f| f.to_string()).collect()
            }
            FormatCategory::Save => Vec::new(),
        }
    }

    /// Apply preset `index` of `category`; returns false when there is no such preset
    pub fn choose(&mut self, category: FormatCategory, index: usize) -> bool {
        let applied = match category {
            FormatCategory::FieldOrder => FIELD_ORDER_PRESETS.get(index).map(|order| {
                self.document.fields_order = order.to_vec();
            }),
            FormatCategory::Separator => SEPARATOR_PRESETS.get(index).map(|separator| {
                self.document.separator = separator.to_string();
            }),
            FormatCategory::DateFormat => DATE_FORMAT_PRESETS.get(index).map(|pattern| {
                self.document.date_format = pattern.to_string();
            }),
            FormatCategory::Save => None,
        };
        applied.is_some()
    }
}

/// Run the format submenu once
pub fn configure_format(prompter: &mut dyn Prompter, store: &SchemaStore) -> Result<()> {
    let options = numbered(FormatAction::ALL.iter().map(|action| action.label()));
    let Some(action) = prompter
        .prompt_choice("Configure log format", &options)?
        .and_then(FormatAction::from_index)
    else {
        return Ok(());
    };

    match action {
        FormatAction::Import => import_schema(prompter, store),
        FormatAction::Manual => configure_manually(prompter, store),
        FormatAction::Reset => {
            store.reset_custom()?;
            prompter.print_block(
                "Custom format cleared, the default format applies",
                BlockStyle::Success,
            )
        }
        FormatAction::Show => {
            let resolved = store.resolve()?;
            for diagnostic in &resolved.diagnostics {
                prompter.print_block(&diagnostic.to_string(), BlockStyle::Error)?;
            }
            prompter.print_block(&describe_schema(&resolved), BlockStyle::Info)
        }
    }
}

fn import_schema(prompter: &mut dyn Prompter, store: &SchemaStore) -> Result<()> {
    let input = prompter.prompt_line("Enter the full path of the schema file:")?;
    let path = input.trim();
    if path.is_empty() {
        return Ok(());
    }

    let schema = store.import_custom(Path::new(path))?;
    prompter.print_block(
        &format!(
            "Schema loaded: {} / '{}' / {}",
            field_order_label(schema.field_order()),
            schema.separator().as_document_value(),
            schema.date_format().pattern()
        ),
        BlockStyle::Success,
    )
}

/// Edit a draft until it is saved; cancelling discards it
fn configure_manually(prompter: &mut dyn Prompter, store: &SchemaStore) -> Result<()> {
    let mut draft = FormatDraft::new();
    loop {
        let labels = draft.category_labels();
        let Some(category) = prompter
            .prompt_choice("Manual configuration", &labels)?
            .and_then(FormatCategory::from_index)
        else {
            return Ok(());
        };

        if category == FormatCategory::Save {
            Schema::try_from(draft.document()).map_err(|violation| {
                LoglensError::InvalidSchema {
                    path: store.loader().custom_path().to_path_buf(),
                    reason: violation.to_string(),
                }
            })?;
            store.save_custom(draft.document())?;
            return prompter.print_block("Configuration saved", BlockStyle::Success);
        }

        let options = FormatDraft::options(category);
        if let Some(index) = prompter.prompt_choice(category.title(), &options)? {
            draft.choose(category, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::presets::DEFAULT_SCHEMA_JSON;
    use crate::schema::{FieldTag, SchemaLoader, SchemaOrigin};
    use crate::ui::MockPrompter;
    use std::fs;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SchemaStore {
        let custom = dir.path().join("custom.json");
        let default = dir.path().join("default.json");
        fs::write(&custom, "").unwrap();
        fs::write(&default, DEFAULT_SCHEMA_JSON).unwrap();
        SchemaStore::new(SchemaLoader::new(custom, default))
    }

    #[test]
    fn test_draft_starts_at_builtin_layout() {
        let draft = FormatDraft::new();
        let labels = draft.category_labels();
        assert_eq!(labels[0], "Field order: Date, Level, Message");
        assert_eq!(labels[1], "Separator: '[]'");
        assert_eq!(labels[2], "Date format: yyyy-MM-dd HH:mm:ss");
        assert_eq!(labels[3], "Save current configuration");
    }

    #[test]
    fn test_draft_choose_presets() {
        let mut draft = FormatDraft::new();
        assert!(draft.choose(FormatCategory::FieldOrder, 2));
        assert!(draft.choose(FormatCategory::Separator, 4));
        assert!(draft.choose(FormatCategory::DateFormat, 1));
        assert!(!draft.choose(FormatCategory::DateFormat, 9));
        assert!(!draft.choose(FormatCategory::Save, 0));

        let document = draft.document();
        assert_eq!(
            document.fields_order,
            vec![FieldTag::Message, FieldTag::Date, FieldTag::Level]
        );
        assert_eq!(document.separator, " / ");
        assert_eq!(document.date_format, "dd.MM.yyyy HH:mm");
        assert!(FormatDraft::options(FormatCategory::Save).is_empty());
    }

    #[test]
    fn test_manual_configuration_saves_custom_schema() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        // Manual -> Separator -> " | " -> Save
        let mut prompter = MockPrompter::new().choose(1).choose(1).choose(0).choose(3);

        configure_format(&mut prompter, &store).unwrap();

        let resolved = store.resolve().unwrap();
        assert_eq!(resolved.origin, SchemaOrigin::Custom);
        assert_eq!(resolved.schema.separator().as_document_value(), " | ");
        assert_eq!(prompter.printed(BlockStyle::Success), vec!["Configuration saved"]);
    }

    #[test]
    fn test_cancelled_manual_configuration_saves_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut prompter = MockPrompter::new().choose(1).choose(0).choose(1).cancel();

        configure_format(&mut prompter, &store).unwrap();
        assert_eq!(store.resolve().unwrap().origin, SchemaOrigin::Default);
    }

    #[test]
    fn test_import_and_reset() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let schema_file = dir.path().join("mine.json");
        fs::write(
            &schema_file,
            r#"{"fieldsOrder":["Level","Date","Message"],"separator":"{}","dateFormat":"dd.MM.yyyy HH:mm"}"#,
        )
        .unwrap();

        let mut prompter = MockPrompter::new()
            .choose(0)
            .answer(schema_file.display().to_string());
        configure_format(&mut prompter, &store).unwrap();
        assert_eq!(store.resolve().unwrap().origin, SchemaOrigin::Custom);

        let mut prompter = MockPrompter::new().choose(2);
        configure_format(&mut prompter, &store).unwrap();
        assert_eq!(store.resolve().unwrap().origin, SchemaOrigin::Default);
    }

    #[test]
    fn test_import_of_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let schema_file = dir.path().join("bad.json");
        fs::write(&schema_file, r#"{"fieldsOrder":[],"separator":"","dateFormat":""}"#).unwrap();

        let mut prompter = MockPrompter::new()
            .choose(0)
            .answer(schema_file.display().to_string());
        let result = configure_format(&mut prompter, &store);
        assert!(matches!(result, Err(LoglensError::InvalidSchema { .. })));
        assert_eq!(store.resolve().unwrap().origin, SchemaOrigin::Default);
    }

    #[test]
    fn test_show_reports_fallback() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut prompter = MockPrompter::new().choose(3);

        configure_format(&mut prompter, &store).unwrap();
        assert!(!prompter.printed(BlockStyle::Error).is_empty());
        assert!(prompter.printed(BlockStyle::Info)[0].contains("Source: default schema"));
    }
}
