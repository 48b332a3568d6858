// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use tbxmin::app_config::{self, Config, OutputFormat};
use tbxmin::conversion::convert_with_report;
use tbxmin::errors::AppError;
use tbxmin::file_utils::{FileManager, InputSource};
use tbxmin::language_utils::language_display_name;
use tbxmin::tbx_min::writer;

const DEFAULT_CONFIG_PATH: &str = "tbx2min.json";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Xml,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Xml => OutputFormat::Xml,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a TBX file to TBX-Min (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for tbx2min
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// TBX file to convert
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language code (e.g., 'en', 'de')
    #[arg(value_name = "SOURCE_LANG")]
    source_language: String,

    /// Target language code (e.g., 'en', 'de')
    #[arg(value_name = "TARGET_LANG")]
    target_language: String,

    #[command(flatten)]
    options: OutputOptions,
}

#[derive(clap::Args, Debug, Clone)]
struct OutputOptions {
    /// Write the result to a file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// tbx2min - convert TBX termbases to TBX-Min
///
/// Reads a TBX file, keeps the two requested languages and writes the
/// TBX-Min equivalent. Anything TBX-Min cannot express at term level is
/// kept as a note; everything else is reported in the log.
#[derive(Parser, Debug)]
#[command(name = "tbx2min")]
#[command(version)]
#[command(about = "Convert TBX termbases to TBX-Min")]
#[command(long_about = "tbx2min converts a TBX termbase into a TBX-Min document for one language pair.

EXAMPLES:
    tbx2min glossary.tbx en de                  # Print TBX-Min to standard output
    tbx2min glossary.tbx EN DE -o glossary.tbxm # Write to a file
    tbx2min glossary.tbx en de -f json          # Emit the document as JSON
    tbx2min glossary.tbx en de -l info          # Show every element not converted
    tbx2min completions bash > tbx2min.bash     # Generate bash completions

CONFIGURATION:
    Settings are read from tbx2min.json when present, or from the file given
    with --config-path. Command line options take precedence.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TBX file to convert
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Source language code
    #[arg(value_name = "SOURCE_LANG")]
    source_language: Option<String>,

    /// Target language code
    #[arg(value_name = "TARGET_LANG")]
    target_language: Option<String>,

    #[command(flatten)]
    options: OutputOptions,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the max level is narrowed once the
    // config and command line are known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Warn);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tbx2min", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => Ok(run_convert(args)?),
        None => {
            // Default behavior - positional arguments without a subcommand
            let (input_path, source_language, target_language) =
                match (cli.input_path, cli.source_language, cli.target_language) {
                    (Some(input), Some(source), Some(target)) => (input, source, target),
                    _ => {
                        return Err(anyhow!(
                            "Usage: tbx2min <INPUT_PATH> <SOURCE_LANG> <TARGET_LANG> (see --help)"
                        ));
                    }
                };

            Ok(run_convert(ConvertArgs {
                input_path,
                source_language,
                target_language,
                options: cli.options,
            })?)
        }
    }
}

fn run_convert(args: ConvertArgs) -> Result<(), AppError> {
    let options = args.options;

    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = &options.log_level {
        let level: app_config::LogLevel = cli_level.clone().into();
        log::set_max_level(level_filter(&level));
    }

    // Load configuration; only an explicitly named file must exist
    let mut config = match &options.config_path {
        Some(path) => Config::load(path, true),
        None => Config::load(DEFAULT_CONFIG_PATH, false),
    }
    .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    if let Some(cli_level) = &options.log_level {
        config.log_level = cli_level.clone().into();
    }
    if let Some(format) = &options.format {
        config.output.format = format.clone().into();
    }
    log::set_max_level(level_filter(&config.log_level));

    let input = InputSource::from_path(&args.input_path);
    let mut conversion =
        convert_with_report(&input, &args.source_language, &args.target_language)?;
    config.header.apply(&mut conversion.document);

    let rendered = match config.output.format {
        OutputFormat::Xml => {
            writer::to_xml_string(&conversion.document, &config.output.xml_options())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&conversion.document)?,
    };

    match &options.output {
        Some(path) => {
            FileManager::write_to_file(path, &rendered)
                .map_err(|e| AppError::File(format!("{:#}", e)))?;
            info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| {
                    AppError::Output(format!("Failed to write to standard output: {}", e))
                })?;
        }
    }

    let warnings = conversion.warnings().count();
    info!(
        "Converted {} entries ({} -> {}), {} diagnostics, {} warnings",
        conversion.document.entries().len(),
        language_display_name(&args.source_language),
        language_display_name(&args.target_language),
        conversion.diagnostics.len(),
        warnings
    );
    if conversion.document.entries().is_empty() {
        warn!("No entries were converted");
    }

    Ok(())
}
