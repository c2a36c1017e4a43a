// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use notes2ipe::app_config::{self, Config};
use notes2ipe::app_controller::{Controller, OutputTargets};
use notes2ipe::drawing::Point;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a note archive (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for notes2ipe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct ConvertArgs {
    /// Note archive to convert
    #[arg(value_name = "ARCHIVE")]
    input_path: Option<PathBuf>,

    /// Write the drawing as a standalone page (.ipe, or any format ipetoipe writes)
    #[arg(short = 'p', long)]
    output_page: Option<PathBuf>,

    /// Write the recorded audio (.mp3 is re-encoded with libmp3lame)
    #[arg(short = 's', long)]
    output_sound: Option<PathBuf>,

    /// Write the attached rich text
    #[arg(short = 'r', long)]
    output_rtf: Option<PathBuf>,

    /// Copy the drawing to the clipboard as an Ipe selection
    #[arg(short = 'x', long)]
    clipboard: bool,

    /// Print the drawing as an Ipe selection on stdout
    #[arg(long)]
    print_selection: bool,

    /// Center of the selection (defaults to half the drawing's extent)
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    anchor: Option<Vec<f64>>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// notes2ipe - handwritten note archives to Ipe drawings
///
/// Extracts pen strokes, audio and rich text from a note archive.
#[derive(Parser, Debug)]
#[command(name = "notes2ipe")]
#[command(version)]
#[command(about = "Convert handwritten note archives into Ipe drawings, audio and RTF")]
#[command(long_about = "notes2ipe reads a note archive and writes its drawing, audio and rich text as separate files.

EXAMPLES:
    notes2ipe note.tar                          # Print the drawing as an Ipe selection
    notes2ipe -x note.tar                       # Copy the drawing to the clipboard
    notes2ipe -p page.ipe note.tar              # Write a standalone Ipe page
    notes2ipe -p page.pdf note.tar              # Write page.ipe, then convert with ipetoipe
    notes2ipe -s talk.mp3 -r text.rtf note.tar  # Extract audio and rich text
    notes2ipe completions bash > notes2ipe.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());

            // Logs go to stderr so stdout stays clean for --print-selection
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "notes2ipe", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => run_convert(cli.convert).await,
    }
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&level).into());
    }

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("ARCHIVE is required when no subcommand is specified"))?;

    let mut config = Config::load_or_create(&options.config_path)?;

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level((&config.log_level).into());
    }

    let anchor = match options.anchor.as_deref() {
        Some([x, y]) => Some(Point::new(*x, *y)),
        Some(_) => return Err(anyhow!("--anchor takes exactly two numbers")),
        None => None,
    };

    let mut targets = OutputTargets {
        page: options.output_page,
        sound: options.output_sound,
        rtf: options.output_rtf,
        clipboard: options.clipboard,
        print_selection: options.print_selection,
        anchor,
        force_overwrite: options.force_overwrite,
    };

    // Nothing requested: behave like a filter and print the selection
    if targets.is_empty() {
        targets.print_selection = true;
    }

    let controller = Controller::with_config(config)?;
    let summary = controller.run(&input_path, &targets).await?;

    for path in &summary.written {
        info!("Success: {:?}", path);
    }

    Ok(())
}
