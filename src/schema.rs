//! Schema model, resolution and persistence.
//!
//! A schema describes how one log line is laid out: the order of the date,
//! level and message fields, the separator between them, and the date pattern.

pub mod date_format;
pub mod loader;
pub mod model;
pub mod presets;
pub mod store;

pub use date_format::DateFormat;
pub use loader::{ResolvedSchema, SchemaLoader, SchemaOrigin};
pub use model::{BracketPair, FieldTag, Schema, SchemaDocument, SchemaViolation, Separator};
pub use store::SchemaStore;
