//! Non-interactive pipeline: load, select, emit.
//!
//! The CLI subcommands call these functions directly and the interactive
//! session reuses the load and emit steps. Every step resolves the schema on
//! its own, so a schema changed between loading and emitting is honored.

use crate::codec::{decode_blocks, encode_for_display, encode_for_storage};
use crate::error::{LoglensError, Result};
use crate::file_handler::{load_sources, write_output};
use crate::filter::{DateRangeFilter, LevelFilter, MessageFilter};
use crate::record::LogRecord;
use crate::schema::presets::field_order_label;
use crate::schema::{DateFormat, ResolvedSchema, Schema, SchemaOrigin, SchemaStore};
use crate::sort::{sort_ascending, sort_descending};
use crate::stats::LogStatistics;
use chrono::NaiveDateTime;
use log::info;
use std::path::{Path, PathBuf};

/// Everything learned while loading a batch of files
#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<LogRecord>,
    /// Schema the files were decoded with
    pub schema: Schema,
    pub origin: SchemaOrigin,
    pub files_read: usize,
    pub file_failures: Vec<LoglensError>,
    /// Malformed lines
    pub rejected: Vec<LoglensError>,
    pub schema_diagnostics: Vec<LoglensError>,
}

/// Resolve the schema, read every file and decode them in order.
///
/// Unreadable files and malformed lines are collected, not fatal. Schema
/// resolution failures abort before any file is read.
pub fn load_records<P: AsRef<Path>>(store: &SchemaStore, paths: &[P]) -> Result<LoadReport> {
    let ResolvedSchema {
        schema,
        origin,
        diagnostics,
    } = store.resolve()?;

    let loaded = load_sources(paths);
    let outcome = decode_blocks(&loaded.blocks, &schema);
    info!(
        "Loaded {} records from {} of {} files ({} lines rejected)",
        outcome.records.len(),
        loaded.blocks.len(),
        paths.len(),
        outcome.rejected.len()
    );

    Ok(LoadReport {
        records: outcome.records,
        schema,
        origin,
        files_read: loaded.blocks.len(),
        file_failures: loaded.failures,
        rejected: outcome.rejected,
        schema_diagnostics: diagnostics,
    })
}

/// Result of rendering a collection
#[derive(Debug)]
pub struct EmitReport {
    /// Display form, for the console
    pub display: String,
    /// File the storage form was written to, if any
    pub written: Option<PathBuf>,
    pub schema_diagnostics: Vec<LoglensError>,
}

/// Render records for the console and, with `output`, write the storage form.
///
/// The schema is resolved before anything is rendered, so an unusable schema
/// produces no output at all.
pub fn emit_records(
    store: &SchemaStore,
    records: &[LogRecord],
    output: Option<&Path>,
) -> Result<EmitReport> {
    let resolved = store.resolve()?;

    let display = encode_for_display(records, &resolved.schema);
    if let Some(path) = output {
        write_output(path, &encode_for_storage(records, &resolved.schema))?;
    }

    Ok(EmitReport {
        display,
        written: output.map(Path::to_path_buf),
        schema_diagnostics: resolved.diagnostics,
    })
}

/// Record selection for `convert`
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// Comma-separated levels
    pub levels: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub contains: Option<String>,
    /// Sort key name
    pub sort: Option<String>,
    pub descending: bool,
}

/// Apply level, date range and keyword filters in that order, then sort.
///
/// A missing date bound is open-ended. Bounds are parsed with `date_format`.
pub fn select_records(
    records: &[LogRecord],
    options: &SelectOptions,
    date_format: &DateFormat,
) -> Result<Vec<LogRecord>> {
    let mut selected = records.to_vec();

    if let Some(levels) = &options.levels {
        let mut filter = LevelFilter::new();
        filter.configure(levels);
        selected = filter.apply(&selected);
    }

    if options.from.is_some() || options.to.is_some() {
        let start = parse_bound(options.from.as_deref(), date_format, NaiveDateTime::MIN)?;
        let end = parse_bound(options.to.as_deref(), date_format, NaiveDateTime::MAX)?;
        if start > end {
            return Err(LoglensError::invalid_argument(
                "the start date is after the end date",
            ));
        }
        selected = DateRangeFilter::with_bounds(start, end).apply(&selected);
    }

    if let Some(keyword) = &options.contains {
        let mut filter = MessageFilter::new();
        filter.configure(keyword);
        selected = filter.apply(&selected);
    }

    if let Some(key) = &options.sort {
        selected = if options.descending {
            sort_descending(&selected, key)
        } else {
            sort_ascending(&selected, key)
        };
    }

    Ok(selected)
}

fn parse_bound(
    input: Option<&str>,
    date_format: &DateFormat,
    open_end: NaiveDateTime,
) -> Result<NaiveDateTime> {
    match input {
        None => Ok(open_end),
        Some(text) => date_format.parse(text.trim()).map_err(|err| {
            LoglensError::invalid_argument(format!(
                "date '{}' does not match '{}': {}",
                text.trim(),
                date_format.pattern(),
                err
            ))
        }),
    }
}

#[derive(Debug)]
pub struct ConvertReport {
    pub load: LoadReport,
    pub selected: usize,
    pub emit: EmitReport,
}

/// Load files, select records and emit them
pub fn convert<P: AsRef<Path>>(
    store: &SchemaStore,
    paths: &[P],
    options: &SelectOptions,
    output: Option<&Path>,
) -> Result<ConvertReport> {
    let load = load_records(store, paths)?;
    let selected = select_records(&load.records, options, load.schema.date_format())?;
    let emit = emit_records(store, &selected, output)?;
    Ok(ConvertReport {
        selected: selected.len(),
        load,
        emit,
    })
}

#[derive(Debug)]
pub struct StatsReport {
    pub load: LoadReport,
    pub statistics: LogStatistics,
    /// Plain-text report
    pub text: String,
}

/// Load files and summarize them, optionally writing the report to `output`
pub fn statistics<P: AsRef<Path>>(
    store: &SchemaStore,
    paths: &[P],
    output: Option<&Path>,
) -> Result<StatsReport> {
    let load = load_records(store, paths)?;
    let statistics = LogStatistics::compute(&load.records);
    let text = statistics.render_report(&load.schema);
    if let Some(path) = output {
        write_output(path, &text)?;
    }
    Ok(StatsReport {
        load,
        statistics,
        text,
    })
}

/// Human-readable description of the active schema
pub fn describe_schema(resolved: &ResolvedSchema) -> String {
    let origin = match resolved.origin {
        SchemaOrigin::Custom => "custom",
        SchemaOrigin::Default => "default",
    };
    format!(
        "Source: {origin} schema\nField order: {}\nSeparator: '{}'\nDate format: {}",
        field_order_label(resolved.schema.field_order()),
        resolved.schema.separator().as_document_value(),
        resolved.schema.date_format().pattern()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::presets::DEFAULT_SCHEMA_JSON;
    use crate::schema::SchemaLoader;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir, custom: &str) -> SchemaStore {
        let custom_path = dir.path().join("custom.json");
        let default_path = dir.path().join("default.json");
        fs::write(&custom_path, custom).unwrap();
        fs::write(&default_path, DEFAULT_SCHEMA_JSON).unwrap();
        SchemaStore::new(SchemaLoader::new(custom_path, default_path))
    }

    fn write_log(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    const SAMPLE: &str = "[2024-01-01 09:00:00] [ERROR] disk full\n\
                          [2024-01-01 10:00:00] [INFO] started\n\
                          garbage line\n\
                          [2024-01-01 11:00:00] [WARN] disk slow\n";

    #[test]
    fn test_load_collects_failures_and_rejections() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "");
        let log = write_log(&dir, "app.log", SAMPLE);
        let missing = dir.path().join("missing.log");

        let report = load_records(&store, &[log, missing]).unwrap();
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.files_read, 1);
        assert_eq!(report.file_failures.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.origin, SchemaOrigin::Default);
        assert!(!report.schema_diagnostics.is_empty());
    }

    #[test]
    fn test_select_filters_then_sorts() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "");
        let log = write_log(&dir, "app.log", SAMPLE);
        let load = load_records(&store, &[log]).unwrap();

        let options = SelectOptions {
            contains: Some("disk".to_string()),
            from: Some("2024-01-01 08:00:00".to_string()),
            sort: Some("date".to_string()),
            descending: true,
            ..SelectOptions::default()
        };
        let selected = select_records(&load.records, &options, load.schema.date_format()).unwrap();
        let messages: Vec<&str> = selected.iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["disk slow", "disk full"]);
    }

    #[test]
    fn test_select_rejects_bad_bounds() {
        let format = DateFormat::new("yyyy-MM-dd HH:mm:ss").unwrap();
        let options = SelectOptions {
            to: Some("tomorrow".to_string()),
            ..SelectOptions::default()
        };
        assert!(matches!(
            select_records(&[], &options, &format),
            Err(LoglensError::InvalidArgument { .. })
        ));

        let options = SelectOptions {
            from: Some("2024-01-02 00:00:00".to_string()),
            to: Some("2024-01-01 00:00:00".to_string()),
            ..SelectOptions::default()
        };
        assert!(select_records(&[], &options, &format).is_err());
    }

    #[test]
    fn test_convert_writes_storage_form() {
        let dir = TempDir::new().unwrap();
        let store = store_in(
            &dir,
            r#"{"fieldsOrder":["Level","Date","Message"],"separator":" | ","dateFormat":"yyyy-MM-dd HH:mm:ss"}"#,
        );
        let log = write_log(
            &dir,
            "app.log",
            "INFO | 2024-01-01 10:00:00 | started\nERROR | 2024-01-01 09:00:00 | disk full\n",
        );
        let out = dir.path().join("out.log");

        let options = SelectOptions {
            levels: Some("ERROR".to_string()),
            ..SelectOptions::default()
        };
        let report = convert(&store, &[log], &options, Some(out.as_path())).unwrap();
        assert_eq!(report.selected, 1);
        assert_eq!(report.emit.written.as_deref(), Some(out.as_path()));
        assert!(report.emit.display.contains("ERROR"));
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "ERROR | 2024-01-01 09:00:00 | disk full\n"
        );
    }

    #[test]
    fn test_emit_without_usable_schema_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let custom_path = dir.path().join("custom.json");
        fs::write(&custom_path, "{}").unwrap();
        let store = SchemaStore::new(SchemaLoader::new(custom_path, dir.path().join("none.json")));
        let out = dir.path().join("out.log");

        assert!(matches!(
            emit_records(&store, &[], Some(out.as_path())),
            Err(LoglensError::NoUsableSchema { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_statistics_report() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "");
        let log = write_log(&dir, "app.log", SAMPLE);
        let out = dir.path().join("stats.txt");

        let report = statistics(&store, &[log], Some(out.as_path())).unwrap();
        assert_eq!(report.statistics.total, 3);
        assert_eq!(fs::read_to_string(&out).unwrap(), report.text);
    }

    #[test]
    fn test_describe_schema() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "");
        let text = describe_schema(&store.resolve().unwrap());
        assert!(text.contains("Source: default schema"));
        assert!(text.contains("Field order: Date, Level, Message"));
        assert!(text.contains("Separator: '[]'"));
    }
}
