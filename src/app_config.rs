use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::env;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings. API credentials are the
/// exception: they come from the environment only and are never written
/// to the configuration file.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Word list to generate cards from
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    /// Deck file the cards are written to
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Directory for generated MP3 files
    #[serde(default = "default_audio_output_dir")]
    pub audio_output_dir: PathBuf,

    /// Directory for generated PNG files
    #[serde(default = "default_image_output_dir")]
    pub image_output_dir: PathBuf,

    /// Anki collection.media directory to copy media into, when set
    #[serde(default)]
    pub anki_media_dir: Option<PathBuf>,

    /// Language the card fronts are written in (code or English name)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Whether to generate pronunciation audio
    #[serde(default = "default_true")]
    pub generate_audio: bool,

    /// Whether to generate card illustrations (also needs Cloudflare
    /// credentials in the environment)
    #[serde(default = "default_true")]
    pub generate_images: bool,

    /// Fixed shuffle seed for reproducible word order
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Language model settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// API credentials, environment only
    #[serde(skip)]
    pub credentials: Credentials,
}

/// Language model service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion budget for the content request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Completion budget for the translation request, slightly larger
    /// because it carries the already generated content back
    #[serde(default = "default_translation_max_tokens")]
    pub translation_max_tokens: u32,

    // @field: Token bucket capacity (burst size)
    #[serde(default = "default_rate_limit_capacity")]
    pub rate_limit_capacity: u32,

    // @field: Token bucket refill rate in tokens per second
    #[serde(default = "default_rate_limit_refill_per_sec")]
    pub rate_limit_refill_per_sec: f64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Wait before retrying a rate limited request when the server did
    /// not say how long to wait (in seconds)
    #[serde(default = "default_rate_limit_retry_secs")]
    pub rate_limit_retry_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            translation_max_tokens: default_translation_max_tokens(),
            rate_limit_capacity: default_rate_limit_capacity(),
            rate_limit_refill_per_sec: default_rate_limit_refill_per_sec(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            rate_limit_retry_secs: default_rate_limit_retry_secs(),
        }
    }
}

/// API credentials read from the environment.
///
/// The Groq key is required. The Cloudflare pair is optional; when either
/// half is missing, image generation is quietly disabled rather than
/// failing the run.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Groq API key (GROQ_API_KEY)
    pub groq_api_key: String,
    /// Cloudflare account id (CLOUDFLARE_ACCOUNT_ID)
    pub cloudflare_account_id: Option<String>,
    /// Cloudflare API token (CLOUDFLARE_API_TOKEN)
    pub cloudflare_api_token: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Credentials {
            groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            cloudflare_account_id: non_empty_env("CLOUDFLARE_ACCOUNT_ID"),
            cloudflare_api_token: non_empty_env("CLOUDFLARE_API_TOKEN"),
        }
    }

    /// The Cloudflare pair, when both halves are present
    pub fn cloudflare(&self) -> Option<(&str, &str)> {
        match (&self.cloudflare_account_id, &self.cloudflare_api_token) {
            (Some(account), Some(token)) => Some((account.as_str(), token.as_str())),
            _ => None,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_input_file() -> PathBuf {
    PathBuf::from("data/input_words.txt")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("anki_output/anki.txt")
}

fn default_audio_output_dir() -> PathBuf {
    PathBuf::from("anki_output/audio")
}

fn default_image_output_dir() -> PathBuf {
    PathBuf::from("anki_output/images")
}

fn default_target_language() -> String {
    "english".to_string()
}

fn default_model() -> String {
    "meta-llama/llama-4-maverick-17b-128e-instruct".to_string()
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    500
}

fn default_translation_max_tokens() -> u32 {
    600
}

fn default_rate_limit_capacity() -> u32 {
    30
}

fn default_rate_limit_refill_per_sec() -> f64 {
    0.5
}

fn default_retry_count() -> u32 {
    5
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_rate_limit_retry_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file. Credentials are filled from
    /// the environment afterwards, never from the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        config.credentials = Credentials::from_env();
        Ok(config)
    }

    /// Write the configuration as pretty JSON. The credentials field is
    /// skipped by serde, so secrets never land on disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _target_name = crate::language_utils::resolve_language_name(&self.target_language)?;

        if self.credentials.groq_api_key.is_empty() {
            return Err(anyhow!(
                "GROQ_API_KEY is required. Set it in the environment or a .env file"
            ));
        }

        if self.llm.rate_limit_capacity == 0 {
            return Err(anyhow!("llm.rate_limit_capacity must be at least 1"));
        }
        if self.llm.rate_limit_refill_per_sec <= 0.0 {
            return Err(anyhow!("llm.rate_limit_refill_per_sec must be positive"));
        }

        Ok(())
    }

    /// Whether image generation is both wanted and possible
    pub fn images_enabled(&self) -> bool {
        self.generate_images && self.credentials.cloudflare().is_some()
    }

    /// Create the input and output directories the run needs
    pub fn setup_directories(&self) -> Result<()> {
        if let Some(parent) = self.input_file.parent() {
            if !parent.as_os_str().is_empty() {
                FileManager::ensure_dir(parent)?;
            }
        }
        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                FileManager::ensure_dir(parent)?;
            }
        }
        FileManager::ensure_dir(&self.audio_output_dir)?;
        FileManager::ensure_dir(&self.image_output_dir)?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: default_input_file(),
            output_file: default_output_file(),
            audio_output_dir: default_audio_output_dir(),
            image_output_dir: default_image_output_dir(),
            anki_media_dir: None,
            target_language: default_target_language(),
            generate_audio: true,
            generate_images: true,
            shuffle_seed: None,
            llm: LlmConfig::default(),
            log_level: LogLevel::default(),
            credentials: Credentials::default(),
        }
    }
}
