//! Two-tier schema resolution: custom schema first, default schema as fallback.
//!
//! Resolution never caches. The decode path and the encode path each call
//! [`SchemaLoader::resolve`], so a schema edited between two operations is
//! picked up by the second one.

use crate::error::{LoglensError, Result};
use crate::schema::model::{Schema, SchemaDocument};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Which schema file the resolved schema came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOrigin {
    Custom,
    Default,
}

/// A usable schema plus the problems met while resolving it.
#[derive(Debug)]
pub struct ResolvedSchema {
    pub schema: Schema,
    pub origin: SchemaOrigin,
    /// Non-fatal schema errors, in the order they occurred
    pub diagnostics: Vec<LoglensError>,
}

impl ResolvedSchema {
    pub fn is_fallback(&self) -> bool {
        self.origin == SchemaOrigin::Default
    }
}

/// Resolves the active schema from the custom and default schema files.
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    custom_path: PathBuf,
    default_path: PathBuf,
}

impl SchemaLoader {
    pub fn new(custom_path: impl Into<PathBuf>, default_path: impl Into<PathBuf>) -> Self {
        Self {
            custom_path: custom_path.into(),
            default_path: default_path.into(),
        }
    }

    pub fn custom_path(&self) -> &Path {
        &self.custom_path
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Resolve the schema to use for one decode or encode operation.
    ///
    /// # Errors
    /// * `SchemaSourceUnreadable` - the custom schema file cannot be read
    /// * `NoUsableSchema` - the custom schema is unusable and so is the default one
    pub fn resolve(&self) -> Result<ResolvedSchema> {
        let text = std::fs::read_to_string(&self.custom_path).map_err(|source| {
            LoglensError::SchemaSourceUnreadable {
                path: self.custom_path.clone(),
                source,
            }
        })?;

        let mut diagnostics = Vec::new();

        let custom = match parse_document(&self.custom_path, &text) {
            Ok(document) => Schema::try_from(document).map_err(|violation| {
                LoglensError::InvalidSchema {
                    path: self.custom_path.clone(),
                    reason: violation.to_string(),
                }
            }),
            Err(malformed) => {
                report(&mut diagnostics, malformed);
                Err(LoglensError::InvalidSchema {
                    path: self.custom_path.clone(),
                    reason: "custom schema could not be decoded".to_string(),
                })
            }
        };

        match custom {
            Ok(schema) => {
                debug!("Using custom schema from {}", self.custom_path.display());
                Ok(ResolvedSchema {
                    schema,
                    origin: SchemaOrigin::Custom,
                    diagnostics,
                })
            }
            Err(invalid) => {
                report(&mut diagnostics, invalid);
                let schema = self.load_default()?;
                debug!("Using default schema from {}", self.default_path.display());
                Ok(ResolvedSchema {
                    schema,
                    origin: SchemaOrigin::Default,
                    diagnostics,
                })
            }
        }
    }

    /// Load the fallback schema; every failure here is fatal.
    fn load_default(&self) -> Result<Schema> {
        let path = &self.default_path;
        let text = std::fs::read_to_string(path).map_err(|err| {
            LoglensError::no_usable_schema(format!(
                "default schema {} is unreadable: {err}",
                path.display()
            ))
        })?;

        let document = parse_document(path, &text)
            .map_err(|err| LoglensError::no_usable_schema(err.to_string()))?;

        Schema::try_from(document).map_err(|violation| {
            LoglensError::no_usable_schema(format!(
                "default schema {} is invalid: {violation}",
                path.display()
            ))
        })
    }
}

/// Decode schema file text; the text is trimmed first.
pub fn parse_document(path: &Path, text: &str) -> Result<SchemaDocument> {
    serde_json::from_str(text.trim()).map_err(|err| LoglensError::SchemaMalformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn report(diagnostics: &mut Vec<LoglensError>, err: LoglensError) {
    warn!("{err}");
    diagnostics.push(err);
}
