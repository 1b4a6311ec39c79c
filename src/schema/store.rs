//! Persistence of the custom and default schema files.

use crate::error::{LoglensError, Result};
use crate::schema::loader::{parse_document, ResolvedSchema, SchemaLoader};
use crate::schema::model::{Schema, SchemaDocument};
use crate::schema::presets::DEFAULT_SCHEMA_JSON;
use log::info;
use std::path::Path;

/// Reads and writes the schema files a [`SchemaLoader`] resolves from.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    loader: SchemaLoader,
}

impl SchemaStore {
    pub fn new(loader: SchemaLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &SchemaLoader {
        &self.loader
    }

    /// Resolve the active schema (never cached)
    pub fn resolve(&self) -> Result<ResolvedSchema> {
        self.loader.resolve()
    }

    /// Make sure both schema files exist.
    ///
    /// A missing default schema is written from the built-in one; a missing
    /// custom schema is created empty, which resolves to the default.
    pub fn bootstrap(&self) -> Result<()> {
        let default_path = self.loader.default_path();
        if !default_path.exists() {
            write_file(default_path, DEFAULT_SCHEMA_JSON)?;
            info!("Wrote built-in default schema to {}", default_path.display());
        }

        let custom_path = self.loader.custom_path();
        if !custom_path.exists() {
            write_file(custom_path, "")?;
        }

        Ok(())
    }

    /// Save a schema as the custom schema, as pretty-printed JSON
    pub fn save_custom(&self, document: &SchemaDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|err| LoglensError::other(format!("Cannot serialize schema: {err}")))?;
        write_file(self.loader.custom_path(), &json)?;
        info!("Saved custom schema to {}", self.loader.custom_path().display());
        Ok(())
    }

    /// Validate a schema file and adopt it as the custom schema.
    ///
    /// Unlike resolution there is no fallback: an unusable file is an error and
    /// the current custom schema is left untouched.
    pub fn import_custom(&self, path: &Path) -> Result<Schema> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            LoglensError::SchemaSourceUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let document = parse_document(path, &text)?;
        let schema =
            Schema::try_from(&document).map_err(|violation| LoglensError::InvalidSchema {
                path: path.to_path_buf(),
                reason: violation.to_string(),
            })?;

        self.save_custom(&document)?;
        Ok(schema)
    }

    /// Empty the custom schema so the default one applies again
    pub fn reset_custom(&self) -> Result<()> {
        write_file(self.loader.custom_path(), "")?;
        info!("Reset custom schema {}", self.loader.custom_path().display());
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            LoglensError::file_error(format!("Cannot create {}", parent.display()), err)
        })?;
    }
    std::fs::write(path, contents)
        .map_err(|err| LoglensError::file_error(format!("Cannot write {}", path.display()), err))
}
