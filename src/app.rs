//! Application orchestration layer
//!
//! The interactive session owns the loaded collection and wires menu
//! commands to the core components. All user interaction goes through a
//! [`Prompter`], so the session runs the same against a terminal or a script.

pub mod batch;
pub mod format;
pub mod menu;

use crate::config::AppConfig;
use crate::error::{LoglensError, Result};
use crate::file_handler::reader::parse_path_list;
use crate::file_handler::write_output;
use crate::filter::{FilterKind, LogFilter};
use crate::record::LogRecord;
use crate::schema::{Schema, SchemaStore};
use crate::sort::{sort_records, SortDirection, SortKey};
use crate::stats::LogStatistics;
use crate::ui::{BlockStyle, Prompter};
use log::{debug, info};
use menu::{numbered, MainCommand, OutputTarget};
use std::path::PathBuf;

/// Rejected lines listed individually before the rest is summarized
const MAX_LISTED_REJECTIONS: usize = 10;

/// Interactive session - coordinates components without duplicating their state
pub struct Application {
    prompter: Box<dyn Prompter>,
    store: SchemaStore,
    reset_custom_on_exit: bool,
    /// `None` until a load produced at least one record
    records: Option<Vec<LogRecord>>,
}

impl Application {
    pub fn new(config: &AppConfig, prompter: Box<dyn Prompter>) -> Self {
        Self {
            prompter,
            store: config.schema_store(),
            reset_custom_on_exit: config.reset_custom_on_exit,
            records: None,
        }
    }

    pub fn records(&self) -> Option<&[LogRecord]> {
        self.records.as_deref()
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// Run the main menu until the user exits or cancels it
    pub fn run(&mut self) -> Result<()> {
        self.store.bootstrap()?;

        let labels = numbered(MainCommand::ALL.iter().map(|command| command.label()));
        loop {
            let command = self
                .prompter
                .prompt_choice("Main menu", &labels)?
                .and_then(MainCommand::from_index)
                .unwrap_or(MainCommand::Exit);
            if command == MainCommand::Exit {
                break;
            }

            debug!("Executing {:?}", command);
            if let Err(err) = self.execute_command(command) {
                // A broken terminal cannot report anything
                if matches!(err, LoglensError::UIError { .. }) {
                    return Err(err);
                }
                self.report_error(&err)?;
            }
        }

        if self.reset_custom_on_exit {
            if let Err(err) = self.store.reset_custom() {
                self.report_error(&err)?;
            }
        }
        info!("Session finished");
        Ok(())
    }

    /// Execute one main menu command
    pub fn execute_command(&mut self, command: MainCommand) -> Result<()> {
        match command {
            MainCommand::LoadFiles => self.load_files(),
            MainCommand::ConfigureFormat => {
                format::configure_format(self.prompter.as_mut(), &self.store)
            }
            MainCommand::Filter => self.filter_collection(),
            MainCommand::Sort => self.sort_collection(),
            MainCommand::Statistics => self.show_statistics(),
            MainCommand::Output => {
                let records = self.loaded_records()?.to_vec();
                self.output_records(&records)
            }
            MainCommand::Exit => Ok(()),
        }
    }

    fn load_files(&mut self) -> Result<()> {
        let input = self.prompter.prompt_line(
            "Enter the file paths separated by commas (e.g. File1.txt,File2.txt):",
        )?;
        let paths = parse_path_list(&input);
        if paths.is_empty() {
            return Err(LoglensError::invalid_argument("no file path given"));
        }

        let report = batch::load_records(&self.store, &paths)?;
        self.report_all(&report.schema_diagnostics)?;
        self.report_all(&report.file_failures)?;
        self.report_rejections(&report.rejected)?;

        let count = report.records.len();
        self.records = if report.records.is_empty() {
            None
        } else {
            Some(report.records)
        };

        if count == 0 {
            return self
                .prompter
                .print_block("No records were loaded", BlockStyle::Error);
        }
        self.prompter.print_block(
            &format!("Loaded {} records from {} file(s)", count, report.files_read),
            BlockStyle::Success,
        )
    }

    fn filter_collection(&mut self) -> Result<()> {
        let records = self.loaded_records()?.to_vec();

        let options = numbered(FilterKind::ALL.iter().map(|kind| kind.label()));
        let Some(kind) = self
            .prompter
            .prompt_choice("Filter logs", &options)?
            .and_then(FilterKind::from_index)
        else {
            return Ok(());
        };

        // Bounds are read with the format that is active right now
        let resolved = self.store.resolve()?;
        let mut filter = LogFilter::new(kind);
        let mut answers = Vec::new();
        for prompt in filter.prompts(resolved.schema.date_format()) {
            answers.push(self.prompter.prompt_line(&prompt)?);
        }
        let reports = filter.configure(&answers, resolved.schema.date_format());
        self.report_all(&reports)?;

        let filtered = filter.apply(Some(records.as_slice()))?;
        self.prompter.print_block(
            &format!("{} of {} records match", filtered.len(), records.len()),
            BlockStyle::Info,
        )?;
        self.output_records(&filtered)
    }

    fn sort_collection(&mut self) -> Result<()> {
        let records = self.loaded_records()?.to_vec();

        let keys = numbered(SortKey::ALL.iter().map(|key| key.label()));
        let Some(key) = self
            .prompter
            .prompt_choice("Sort logs", &keys)?
            .and_then(|index| SortKey::ALL.get(index).copied())
        else {
            return Ok(());
        };

        let directions = [SortDirection::Ascending, SortDirection::Descending];
        let labels: Vec<String> = directions.iter().map(|d| d.label().to_string()).collect();
        let Some(direction) = self
            .prompter
            .prompt_choice("Sort direction", &labels)?
            .and_then(|index| directions.get(index).copied())
        else {
            return Ok(());
        };

        let sorted = sort_records(&records, key, direction);
        self.output_records(&sorted)
    }

    fn show_statistics(&mut self) -> Result<()> {
        let records = self.loaded_records()?;
        let statistics = LogStatistics::compute(records);
        let resolved = self.store.resolve()?;
        self.report_all(&resolved.diagnostics)?;

        let options = numbered(OutputTarget::ALL.iter().map(|target| target.label()));
        let Some(target) = self
            .prompter
            .prompt_choice("Show statistics", &options)?
            .and_then(OutputTarget::from_index)
        else {
            return Ok(());
        };

        match target {
            OutputTarget::Console => self.print_statistics(&statistics, &resolved.schema),
            OutputTarget::File => {
                let path = self.prompt_output_path()?;
                write_output(&path, &statistics.render_report(&resolved.schema))?;
                self.prompter.print_block(
                    &format!("Statistics saved to {}", path.display()),
                    BlockStyle::Success,
                )
            }
        }
    }

    fn print_statistics(
        &mut self,
        statistics: &LogStatistics,
        schema: &Schema,
    ) -> Result<()> {
        let prompter = self.prompter.as_mut();
        prompter.print_block("Statistics", BlockStyle::Header)?;
        prompter.print_block(
            &format!("Total records: {}", statistics.total),
            BlockStyle::Info,
        )?;

        let mut levels = vec!["Records by level".to_string()];
        levels.extend(statistics.level_lines().into_iter().map(|line| format!("▸ {line}")));
        prompter.print_block(&levels.join("\n"), BlockStyle::Info)?;

        let describe = |record: &Option<LogRecord>| match record {
            Some(record) => LogStatistics::describe_record(record, schema),
            None => "N/A".to_string(),
        };
        prompter.print_block(
            &format!(
                "Earliest: {}\nLatest: {}",
                describe(&statistics.earliest),
                describe(&statistics.latest)
            ),
            BlockStyle::Info,
        )?;
        prompter.print_block(
            &format!(
                "Average message length: {:.2} characters",
                statistics.average_message_length
            ),
            BlockStyle::Info,
        )
    }

    /// Ask where a collection goes, then print it or save it
    fn output_records(&mut self, records: &[LogRecord]) -> Result<()> {
        let options = numbered(OutputTarget::ALL.iter().map(|target| target.label()));
        let Some(target) = self
            .prompter
            .prompt_choice("Output", &options)?
            .and_then(OutputTarget::from_index)
        else {
            return Ok(());
        };

        let output = match target {
            OutputTarget::Console => None,
            OutputTarget::File => Some(self.prompt_output_path()?),
        };

        let emitted = batch::emit_records(&self.store, records, output.as_deref())?;
        self.report_all(&emitted.schema_diagnostics)?;
        self.prompter.print_block(&emitted.display, BlockStyle::Plain)?;
        if let Some(path) = emitted.written {
            self.prompter.print_block(
                &format!("Saved {} records to {}", records.len(), path.display()),
                BlockStyle::Success,
            )?;
        }
        Ok(())
    }

    fn prompt_output_path(&mut self) -> Result<PathBuf> {
        let input = self.prompter.prompt_line("Enter the output file path:")?;
        let path = input.trim().trim_matches('"');
        if path.is_empty() {
            return Err(LoglensError::invalid_argument("no output path given"));
        }
        Ok(PathBuf::from(path))
    }

    /// The loaded collection; `NullInput` when nothing has been loaded
    fn loaded_records(&self) -> Result<&[LogRecord]> {
        self.records.as_deref().ok_or(LoglensError::NullInput {
            what: "log records (load log files first)",
        })
    }

    fn report_error(&mut self, err: &LoglensError) -> Result<()> {
        self.prompter.print_block(&err.to_string(), BlockStyle::Error)
    }

    fn report_all(&mut self, errors: &[LoglensError]) -> Result<()> {
        for err in errors {
            self.report_error(err)?;
        }
        Ok(())
    }

    fn report_rejections(&mut self, rejected: &[LoglensError]) -> Result<()> {
        self.report_all(&rejected[..rejected.len().min(MAX_LISTED_REJECTIONS)])?;
        if rejected.len() > MAX_LISTED_REJECTIONS {
            self.prompter.print_block(
                &format!(
                    "{} more malformed lines skipped",
                    rejected.len() - MAX_LISTED_REJECTIONS
                ),
                BlockStyle::Error,
            )?;
        }
        Ok(())
    }
}
