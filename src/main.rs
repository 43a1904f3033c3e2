// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use ankiwort::app_config::{self, Config, Credentials};
use ankiwort::app_controller::Controller;

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
    /// Generate the Anki deck from the word list (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Generate shell completions for ankiwort
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Input word list file (one German word per line)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output deck file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target language for the card front (code or name, e.g. 'es', 'spanish')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Skip pronunciation audio generation
    #[arg(long)]
    no_audio: bool,

    /// Skip card illustration generation
    #[arg(long)]
    no_image: bool,

    /// Anki media collection directory to copy audio and images into
    #[arg(long)]
    anki_media_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Shuffle seed for a reproducible word order
    #[arg(long)]
    seed: Option<u64>,

    /// Load the word list and report what would run, without any API calls
    #[arg(long)]
    dry_run: bool,
}

/// ankiwort - AI-powered Anki deck generator for German vocabulary
///
/// Reads a plain word list and produces an Anki-importable deck with
/// translations, example sentences, pronunciation audio and illustrations.
#[derive(Parser, Debug)]
#[command(name = "ankiwort")]
#[command(author = "ankiwort team")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered Anki deck generator for German vocabulary")]
#[command(long_about = "ankiwort turns a list of German words into Anki flashcards using AI: card
content comes from the Groq API, pronunciation audio from Google Translate
TTS and illustrations from Cloudflare Workers AI. Interrupted runs resume
where they left off.

EXAMPLES:
    ankiwort                                     # Generate using default config
    ankiwort -i words.txt -o deck/anki.txt       # Custom input and output paths
    ankiwort -t spanish                          # Card fronts in Spanish
    ankiwort --no-audio --no-image               # Text-only cards
    ankiwort --dry-run                           # Show what would be processed
    ankiwort --seed 42 -l debug                  # Fixed word order, debug logging
    ankiwort completions bash > ankiwort.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

ENVIRONMENT:
    GROQ_API_KEY            - Groq API key (required)
    CLOUDFLARE_ACCOUNT_ID   - Cloudflare account for image generation (optional)
    CLOUDFLARE_API_TOKEN    - Cloudflare API token for image generation (optional)

    Variables can also be provided through a .env file in the working
    directory. Credentials are never written to the config file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "31",
            Level::Warn => "33",
            Level::Info => "32",
            Level::Debug => "36",
            Level::Trace => "35",
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
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[1;{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ankiwort", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        // Default behavior - generate with the top-level args
        None => run_generate(cli.generate).await,
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load credentials from a .env file if one is present
    dotenvy::dotenv().ok();

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();
        config.credentials = Credentials::from_env();

        // Save default config
        config
            .save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(input) = &options.input {
        config.input_file = input.clone();
    }
    if let Some(output) = &options.output {
        config.output_file = output.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if options.no_audio {
        config.generate_audio = false;
    }
    if options.no_image {
        config.generate_images = false;
    }
    if let Some(media_dir) = &options.anki_media_dir {
        config.anki_media_dir = Some(media_dir.clone());
    }
    if let Some(seed) = options.seed {
        config.shuffle_seed = Some(seed);
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(config.log_level.to_level_filter());
    }

    if options.dry_run {
        let controller = Controller::new(config)?;
        return controller.preflight();
    }

    config
        .setup_directories()
        .context("Failed to create output directories")?;

    // Create controller and run the generation workflow
    let controller = Controller::new(config)?;
    controller.run().await?;

    Ok(())
}
