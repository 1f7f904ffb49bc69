// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;

use transfix::app_config::{self, Config, ConfigOverrides};
use transfix::batch::{run_batch, BatchOptions};
use transfix::language_utils;
use transfix::presentation::{Presenter, TerminalPresenter};
use transfix::services::{HttpPostProcessor, LindatTranslator};
use transfix::model::trim_piped_newline;
use transfix::{TranslationOrchestrator, TranslationRequest};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Translate one text and post-process the translation (default command)
    Translate {
        /// Text to translate; read from stdin when omitted
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// Translate stdin line by line, printing `source<TAB>translation<TAB>postprocessed`
    Batch {
        /// Print only lines changed by the postprocessor
        #[arg(long)]
        changes: bool,

        /// Keep blank input lines as blank output lines
        #[arg(long)]
        keep_blank: bool,
    },

    /// Generate shell completions for transfix
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command; they override the configuration file
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Source language code (e.g., 'cs', 'en')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'cs', 'en')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Primary translation service URL
    #[arg(long, env = "TRANSFIX_PRIMARY_ENDPOINT", global = true)]
    primary_endpoint: Option<String>,

    /// Postprocessing service URL
    #[arg(long, env = "TRANSFIX_POSTPROCESSOR_ENDPOINT", global = true)]
    postprocessor_endpoint: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

/// transfix - machine translation with post-processing
///
/// Sends text to a machine translation service, then sends the source text and
/// the translation to a postprocessing service and prints both results.
#[derive(Parser, Debug)]
#[command(name = "transfix")]
#[command(version)]
#[command(about = "Machine translation followed by automatic post-processing")]
#[command(long_about = "transfix translates text with a machine translation service and repairs the
translation with a postprocessing service.

EXAMPLES:
    transfix \"Ahoj světe\"                       # Translate one text
    echo \"Ahoj světe\" | transfix translate      # Read the text from stdin
    transfix -s cs -t en batch < sentences.txt  # Translate line by line
    transfix batch --changes < sentences.txt    # Show only repaired lines
    transfix completions bash > transfix.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

// @struct: Stderr logger with timestamps and per-level colors
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "transfix", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Batch { changes, keep_blank }) => {
            run_batch_command(&cli.common, changes, keep_blank).await
        }
        Some(Commands::Translate { text }) => run_translate(&cli.common, text).await,
        None => run_translate(&cli.common, cli.text).await,
    }
}

/// Load the configuration, apply CLI overrides and set the log level
fn load_config(options: &CommonArgs) -> Result<Config> {
    if let Some(level) = options.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    config.apply_overrides(&ConfigOverrides {
        source_language: options.source_language.clone(),
        target_language: options.target_language.clone(),
        primary_endpoint: options.primary_endpoint.clone(),
        postprocessor_endpoint: options.postprocessor_endpoint.clone(),
        log_level: options.log_level.map(Into::into),
    });

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    debug!("Primary endpoint: {}", config.primary.endpoint);
    debug!("Postprocessor endpoint: {}", config.postprocessor.endpoint);
    Ok(config)
}

fn build_orchestrator(config: &Config, presenter: Arc<dyn Presenter>) -> Result<TranslationOrchestrator> {
    let translator = LindatTranslator::from_config(&config.primary)
        .context("Failed to create translation client")?;
    let postprocessor = HttpPostProcessor::from_config(&config.postprocessor)
        .context("Failed to create postprocessor client")?;

    Ok(TranslationOrchestrator::new(Arc::new(translator), Arc::new(postprocessor), presenter))
}

fn language_pair(config: &Config) -> Result<(String, String)> {
    Ok((
        language_utils::normalize_to_part1(&config.source_language)?,
        language_utils::normalize_to_part1(&config.target_language)?,
    ))
}

async fn run_translate(options: &CommonArgs, text: Option<String>) -> Result<ExitCode> {
    let config = load_config(options)?;
    let (source_language, target_language) = language_pair(&config)?;

    let input_text = match text {
        Some(text) => text,
        None => read_stdin_text()?,
    };

    let presenter = Arc::new(TerminalPresenter::new());
    let orchestrator = build_orchestrator(&config, presenter)?;

    info!(
        "Translating from {} to {}",
        language_utils::get_language_name(&source_language)?,
        language_utils::get_language_name(&target_language)?
    );

    let request = TranslationRequest::new(source_language, target_language, input_text);
    let outcome = orchestrator.execute_with_outcome(request).await;

    Ok(ExitCode::from(outcome.exit_status()))
}

async fn run_batch_command(options: &CommonArgs, changes_only: bool, keep_blank: bool) -> Result<ExitCode> {
    let config = load_config(options)?;
    let (source_language, target_language) = language_pair(&config)?;

    let presenter = Arc::new(TerminalPresenter::banners_only());
    let orchestrator = build_orchestrator(&config, presenter)?;

    let batch_options = BatchOptions {
        source_language,
        target_language,
        changes_only,
        keep_blank,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let statistics = run_batch(&orchestrator, &batch_options, stdin.lock(), stdout.lock()).await?;

    eprint!("{}", statistics);

    Ok(ExitCode::from(statistics.exit_status()))
}

// A piped text usually ends with one newline that is not part of the input
fn read_stdin_text() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(anyhow!("TEXT is required when stdin is not piped"));
    }

    let text = std::io::read_to_string(stdin).context("Failed to read text from stdin")?;
    Ok(trim_piped_newline(text))
}
