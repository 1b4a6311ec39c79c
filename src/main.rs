//! loglens - Schema-Driven Log Parser
//!
//! Runs the interactive menu by default; `convert`, `stats` and `schema`
//! subcommands cover the same operations non-interactively.

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use loglens::app::batch::{self, LoadReport, SelectOptions};
use loglens::{AppConfig, LoglensError, SchemaStore};
use std::path::{Path, PathBuf};

fn build_cli() -> Command {
    let files = Arg::new("files")
        .help("Log files to read, in order")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(PathBuf));
    let output = Arg::new("output")
        .long("output")
        .short('o')
        .value_name("PATH")
        .help("Also write the result to this file (created or truncated)")
        .value_parser(value_parser!(PathBuf));

    Command::new("loglens")
        .version(loglens::VERSION)
        .about("A schema-driven log parser for filtering, sorting and reformatting log files")
        .long_about(
            "loglens parses structured log lines according to a configurable schema \
             (field order, separator, date format), then filters, sorts, summarizes \
             and re-emits them. Without a subcommand it starts the interactive menu.",
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Settings file (default: $LOGLENS_CONFIG or the user config dir)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("custom-schema")
                .long("custom-schema")
                .global(true)
                .value_name("PATH")
                .help("Custom schema file to use")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("default-schema")
                .long("default-schema")
                .global(true)
                .value_name("PATH")
                .help("Fallback schema file to use")
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(Command::new("interactive").about("Start the interactive menu"))
        .subcommand(
            Command::new("convert")
                .about("Decode, filter and sort log files, then print them")
                .arg(files.clone())
                .arg(
                    Arg::new("level")
                        .long("level")
                        .value_name("LEVELS")
                        .help("Keep only these comma-separated levels"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("DATE")
                        .help("Keep records at or after DATE (schema date format)"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("DATE")
                        .help("Keep records at or before DATE (schema date format)"),
                )
                .arg(
                    Arg::new("contains")
                        .long("contains")
                        .value_name("WORD")
                        .help("Keep records whose message contains WORD"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_name("KEY")
                        .help("Sort by date, level or message length")
                        .value_parser(["date", "level", "message"]),
                )
                .arg(
                    Arg::new("descending")
                        .long("descending")
                        .help("Sort in descending order")
                        .action(ArgAction::SetTrue),
                )
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("stats")
                .about("Print statistics about log files")
                .arg(files)
                .arg(output),
        )
        .subcommand(
            Command::new("schema")
                .about("Inspect or change the custom schema")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show the active schema"))
                .subcommand(Command::new("reset").about("Clear the custom schema"))
                .subcommand(
                    Command::new("import")
                        .about("Validate a schema file and make it the custom schema")
                        .arg(
                            Arg::new("path")
                                .required(true)
                                .value_parser(value_parser!(PathBuf)),
                        ),
                ),
        )
}

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=loglens=debug)
    env_logger::init();

    let matches = build_cli().get_matches();

    let config = AppConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?
        .with_overrides(
            matches.get_one::<PathBuf>("custom-schema").cloned(),
            matches.get_one::<PathBuf>("default-schema").cloned(),
        );

    match matches.subcommand() {
        Some(("convert", sub)) => run_convert(&config.schema_store(), sub),
        Some(("stats", sub)) => run_stats(&config.schema_store(), sub),
        Some(("schema", sub)) => run_schema(&config.schema_store(), sub),
        _ => run_interactive(&config),
    }
}

fn run_interactive(config: &AppConfig) -> Result<()> {
    use loglens::ui::TerminalUI;
    use loglens::Application;

    let prompter = Box::new(TerminalUI::new()?);
    let mut app = Application::new(config, prompter);
    app.run()?;
    Ok(())
}

fn run_convert(store: &SchemaStore, matches: &ArgMatches) -> Result<()> {
    store.bootstrap()?;
    let files = file_args(matches);
    let text = |name: &str| matches.get_one::<String>(name).cloned();
    let options = SelectOptions {
        levels: text("level"),
        from: text("from"),
        to: text("to"),
        contains: text("contains"),
        sort: text("sort"),
        descending: matches.get_flag("descending"),
    };
    let output = matches.get_one::<PathBuf>("output").map(PathBuf::as_path);

    let report = batch::convert(store, &files, &options, output)?;
    report_load(&report.load);
    warn_all(&report.emit.schema_diagnostics);

    print!("{}", report.emit.display);
    if let Some(path) = &report.emit.written {
        eprintln!("Saved {} records to {}", report.selected, path.display());
    }
    Ok(())
}

fn run_stats(store: &SchemaStore, matches: &ArgMatches) -> Result<()> {
    store.bootstrap()?;
    let files = file_args(matches);
    let output = matches.get_one::<PathBuf>("output").map(PathBuf::as_path);

    let report = batch::statistics(store, &files, output)?;
    report_load(&report.load);

    print!("{}", report.text);
    if let Some(path) = output {
        eprintln!("Saved statistics to {}", path.display());
    }
    Ok(())
}

fn run_schema(store: &SchemaStore, matches: &ArgMatches) -> Result<()> {
    store.bootstrap()?;
    match matches.subcommand() {
        Some(("show", _)) => {
            let resolved = store.resolve()?;
            warn_all(&resolved.diagnostics);
            println!("{}", batch::describe_schema(&resolved));
        }
        Some(("reset", _)) => {
            store.reset_custom()?;
            println!("Custom schema cleared");
        }
        Some(("import", sub)) => {
            let path = sub
                .get_one::<PathBuf>("path")
                .ok_or_else(|| LoglensError::invalid_argument("missing schema path"))?;
            store.import_custom(Path::new(path))?;
            println!("Imported {}", path.display());
        }
        _ => unreachable!("clap requires a schema subcommand"),
    }
    Ok(())
}

fn file_args(matches: &ArgMatches) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn report_load(report: &LoadReport) {
    warn_all(&report.schema_diagnostics);
    warn_all(&report.file_failures);
    warn_all(&report.rejected);
}

fn warn_all(errors: &[LoglensError]) {
    for err in errors {
        eprintln!("warning: {err}");
    }
}
