// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use txml_importer::app_config::{self, Config};
use txml_importer::database::{DatabaseConnection, DocumentRecord, Repository};
use txml_importer::file_utils::{FileManager, Location};
use txml_importer::importer::{ImporterOptions, TxmlImporter};

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

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// TXML file, directory of TXML files, or http(s) URI
    #[arg(value_name = "INPUT")]
    input: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print quick unit/segment counts and language pairs as JSON
    Stats(InputArgs),

    /// Print all translation units and segments as JSON
    Import(InputArgs),

    /// Import and store the result in a SQLite database
    Store {
        #[command(flatten)]
        input: InputArgs,

        /// Database file (defaults to the config value, then the user data directory)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Store again even if identical bytes were already imported
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions for txml-importer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// txml-importer - Translation memory import for TXML files
#[derive(Parser, Debug)]
#[command(name = "txml-importer")]
#[command(version = "0.1.0")]
#[command(about = "Import TXML translation memory files")]
#[command(long_about = "txml-importer reads TXML translation memory files (UTF-8 or UTF-16) and
turns them into translation units and cleaned, word-counted segments.

EXAMPLES:
    txml-importer stats memory.txml                 # Quick counts and language pairs
    txml-importer import memory.txml > units.json   # Full import as JSON
    txml-importer -e UTF-16LE import memory.txml    # Skip encoding detection
    txml-importer store /exports/ -d imports.db     # Store a whole directory
    txml-importer stats https://host/memory.txml    # Fetch over HTTP
    txml-importer completions bash > txml.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Encoding of the input (UTF-8, UTF-16LE or UTF-16BE); detected when omitted
    #[arg(short, long, global = true)]
    encoding: Option<String>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
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
            let (emoji, color) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Per-file entry when the input is a directory
#[derive(Serialize)]
struct FileReport<T: Serialize> {
    file: String,
    encoding: String,
    #[serde(flatten)]
    report: T,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is allowed through the logger; the max level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "txml-importer", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Stats(args) => run_stats(&args, &config).await,
        Commands::Import(args) => run_import(&args, &config).await,
        Commands::Store { input, database, force } => run_store(&input, database, force, &config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the config file (creating a default one if missing) and apply CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;

    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(encoding) = &cli.encoding {
        config.encoding = Some(encoding.clone());
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

fn importer_options(config: &Config) -> ImporterOptions {
    ImporterOptions {
        detection_window: config.detection_window_bytes,
        ..ImporterOptions::default()
    }
}

/// Expand the input into the locations to process
///
/// Directories yield every TXML file below them; anything else is a single
/// location.
fn collect_locations(input: &str) -> Result<(Vec<String>, bool)> {
    match Location::parse(input)? {
        Location::Remote(url) => Ok((vec![url.to_string()], false)),
        Location::Path(path) if path.is_dir() => {
            let files = FileManager::find_txml_files(&path)?;
            if files.is_empty() {
                warn!("No .txml files found in {:?}", path);
            }
            let files = files.iter().map(|p| p.to_string_lossy().into_owned()).collect();
            Ok((files, true))
        }
        Location::Path(path) if path.is_file() => Ok((vec![input.to_string()], false)),
        Location::Path(path) => Err(anyhow!("Input path does not exist: {:?}", path)),
    }
}

async fn load_location(location: &str) -> Result<Vec<u8>> {
    FileManager::load_bytes(location)
        .await
        .with_context(|| format!("Failed to load {}", location))
}

/// Importer over bytes already loaded from `location`
fn open_importer(location: &str, bytes: Vec<u8>, config: &Config) -> Result<TxmlImporter> {
    let importer = TxmlImporter::with_options(bytes, config.encoding.as_deref(), importer_options(config))
        .with_context(|| format!("Failed to open {}", location))?;

    let input = importer.resolved_input();
    debug!(
        "{}: resolved encoding {} ({:?}, converted: {})",
        location,
        input.encoding(),
        input.source(),
        !input.is_passthrough()
    );
    Ok(importer)
}

async fn load_importer(location: &str, config: &Config) -> Result<TxmlImporter> {
    let bytes = load_location(location).await?;
    open_importer(location, bytes, config)
}

fn progress_bar(total: usize, message: &'static str) -> ProgressBar {
    let progress_bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));
    progress_bar.set_message(message);
    progress_bar
}

fn print_json<T: Serialize>(value: &T, config: &Config) -> Result<()> {
    let json = if config.pretty_json {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output to JSON")?;

    println!("{}", json);
    Ok(())
}

/// Run one report over every location; a single file errors out, a
/// directory logs failed files and carries on
async fn collect_reports<T, F>(input: &str, config: &Config, message: &'static str, report: F) -> Result<Option<Vec<FileReport<T>>>>
where
    T: Serialize,
    F: Fn(&TxmlImporter) -> T,
{
    let (locations, is_directory) = collect_locations(input)?;

    if !is_directory {
        let importer = load_importer(input, config).await?;
        print_json(&report(&importer), config)?;
        return Ok(None);
    }

    let progress = progress_bar(locations.len(), message);
    let mut reports = Vec::with_capacity(locations.len());

    for location in &locations {
        match load_importer(location, config).await {
            Ok(importer) => reports.push(FileReport {
                file: location.clone(),
                encoding: importer.encoding().to_string(),
                report: report(&importer),
            }),
            Err(e) => error!("Error processing file: {:#}", e),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Finished processing {} of {} files", reports.len(), locations.len());
    Ok(Some(reports))
}

async fn run_stats(args: &InputArgs, config: &Config) -> Result<()> {
    // Single inputs print the bare summary, directories one entry per file
    let reports = collect_reports(&args.input, config, "Scanning", |importer| importer.stats()).await?;

    if let Some(reports) = reports {
        print_json(&reports, config)?;
    }
    Ok(())
}

async fn run_import(args: &InputArgs, config: &Config) -> Result<()> {
    let reports = collect_reports(&args.input, config, "Importing", |importer| importer.import()).await?;

    if let Some(reports) = reports {
        print_json(&reports, config)?;
    }
    Ok(())
}

async fn run_store(args: &InputArgs, database: Option<PathBuf>, force: bool, config: &Config) -> Result<()> {
    let connection = match database.or_else(|| config.database_path.as_ref().map(PathBuf::from)) {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    let repository = Repository::new(connection);

    let (locations, is_directory) = collect_locations(&args.input)?;
    let progress = is_directory.then(|| progress_bar(locations.len(), "Storing"));
    let mut stored = 0usize;

    for location in &locations {
        let outcome = store_location(&repository, location, force, config).await;
        if let Some(progress) = &progress {
            progress.inc(1);
        }

        match outcome {
            Ok(true) => stored += 1,
            Ok(false) => {}
            Err(e) if is_directory => error!("Error processing file: {:#}", e),
            Err(e) => return Err(e),
        }
    }

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    let stats = repository.connection().stats()?;
    info!("Stored {} of {} files ({})", stored, locations.len(), stats);
    Ok(())
}

/// Store one location; `Ok(false)` when it was already stored
async fn store_location(repository: &Repository, location: &str, force: bool, config: &Config) -> Result<bool> {
    let bytes = load_location(location).await?;
    let file_hash = Repository::hash_bytes(&bytes);

    if !force {
        if let Some(existing) = repository.find_document_by_hash(&file_hash).await? {
            info!(
                "Skipping {}: already stored as document {} on {}",
                location, existing.id, existing.imported_at
            );
            return Ok(false);
        }
    }

    let importer = open_importer(location, bytes, config)?;
    let result = importer.import();
    let document = DocumentRecord::new(location.to_string(), file_hash, importer.encoding().to_string());
    let id = repository.store_import(document, &result).await?;

    info!(
        "Stored {} as document {}: {} units, {} segments",
        location,
        id,
        result.units.len(),
        result.segments.len()
    );
    Ok(true)
}
