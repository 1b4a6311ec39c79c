//! # loglens - Schema-Driven Log Parser
//!
//! Parses structured log lines from text files into typed records, then
//! filters, sorts, summarizes and re-emits them to the console or a file.
//! The line layout is described by a user-editable *schema*: field order,
//! separator and date format.
//!
//! ## Features
//!
//! - **Two separator styles**: literal delimiters (` | `) or bracket-wrapped
//!   fields (`[...]`, `{...}`, `(...)`)
//! - **Schema fallback**: an invalid custom schema degrades to the default one
//! - **Symmetric codec**: records written with a schema read back identically
//! - **Filters and sorting**: by level, date range, keyword; by date, level,
//!   message length
//! - **Interactive menu** plus batch subcommands
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`schema`] - Schema model, resolution with fallback, persistence
//! - [`codec`] - Record decoder and encoder
//! - [`filter`], [`sort`], [`stats`] - Operations on record collections
//! - [`file_handler`] - Reading input files, writing output files
//! - [`ui`] - Terminal menus and message blocks
//! - [`app`] - Interactive session and batch pipeline
//! - [`config`] - Application settings

// Core modules
pub mod error;
pub mod record;
pub mod schema;

// Record processing
pub mod codec;
pub mod filter;
pub mod sort;
pub mod stats;

// I/O and presentation
pub mod config;
pub mod file_handler;
pub mod ui;

// Application core
pub mod app;

// Re-export commonly used types for convenience
pub use error::{LoglensError, Result};

// Public API surface for external usage
pub use app::Application;
pub use codec::{decode, decode_blocks, decode_raw_block, encode_for_display, encode_for_storage};
pub use config::AppConfig;
pub use filter::{FilterKind, LogFilter};
pub use record::LogRecord;
pub use schema::{FieldTag, ResolvedSchema, Schema, SchemaLoader, SchemaOrigin, SchemaStore};
pub use sort::{sort_ascending, sort_descending, sort_records, SortDirection, SortKey};
pub use stats::LogStatistics;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
