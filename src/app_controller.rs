/*!
 * Run orchestration.
 *
 * The controller wires the word provider, the per-word processor and the
 * deck writer into one sequential loop. The loop can run interactively
 * with a progress bar, or on a background task that streams progress
 * events over a channel and honours a cooperative stop flag.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::app_config::Config;
use crate::file_utils::DeckWriter;
use crate::providers::{ChatClient, GroqClient, TokenUsage};
use crate::rate_limit::TokenBucket;
use crate::word_processor::WordProcessor;
use crate::word_provider::WordProvider;

// @module: Application controller for deck generation

/// Progress notification emitted during an event-driven run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The word list was loaded and processing is about to begin
    Started { total: usize, resuming: bool },
    /// A word is about to be processed
    WordStarted {
        current: usize,
        total: usize,
        word: String,
    },
    /// A word finished, successfully or not
    WordFinished {
        current: usize,
        total: usize,
        word: String,
        success: bool,
    },
    /// The run ended, possibly early through the stop flag
    Finished {
        succeeded: usize,
        failed: usize,
        stopped: bool,
    },
}

/// Aggregate outcome of a generation run
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    /// Words scheduled for this run
    pub total_words: usize,
    /// Words that produced a deck line
    pub succeeded: usize,
    /// Words that failed after retries
    pub failed: usize,
    /// The failed words, in processing order
    pub failed_words: Vec<String>,
    /// Chat token usage accumulated over the run
    pub token_usage: TokenUsage,
    /// Wall clock duration of the run
    pub elapsed: Duration,
}

impl RunStats {
    /// Share of scheduled words that succeeded, in percent.
    /// An empty run counts as clean.
    pub fn success_rate(&self) -> f64 {
        if self.total_words == 0 {
            return 100.0;
        }
        self.succeeded as f64 / self.total_words as f64 * 100.0
    }

    /// Generate a human readable end-of-run summary.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Processed {}/{} words in {} ({:.0}% success)",
            self.succeeded,
            self.total_words,
            format_duration(self.elapsed),
            self.success_rate()
        );
        if !self.failed_words.is_empty() {
            text.push_str(&format!("\nFailed words: {}", self.failed_words.join(", ")));
        }
        text
    }
}

/// Main application controller for deck generation
pub struct Controller {
    // @field: App configuration
    config: Config,
    processor: WordProcessor,
}

impl Controller {
    /// Create a controller backed by the Groq API described in the configuration.
    pub fn new(config: Config) -> Result<Self> {
        let chat = GroqClient::new(
            config.credentials.groq_api_key.clone(),
            config.llm.model.clone(),
        )
        .with_endpoint(config.llm.endpoint.clone())
        .with_temperature(config.llm.temperature)
        .with_rate_limit(TokenBucket::new(
            config.llm.rate_limit_capacity,
            config.llm.rate_limit_refill_per_sec,
        ));
        Self::with_chat_client(config, Arc::new(chat))
    }

    /// Create a controller with a custom chat backend, mainly for tests.
    pub fn with_chat_client(config: Config, chat: Arc<dyn ChatClient>) -> Result<Self> {
        let processor = WordProcessor::from_config(&config, chat)?;
        Ok(Controller { config, processor })
    }

    /// Run the full generation workflow with a progress bar.
    pub async fn run(&self) -> Result<RunStats> {
        self.run_internal(None, None).await
    }

    /// Run the workflow while streaming progress events over a channel.
    ///
    /// The stop flag is checked between words. When it is set the run ends
    /// early with the stats of what was done; the deck file stays valid for
    /// the next resume.
    pub async fn run_with_events(
        &self,
        events: UnboundedSender<ProgressEvent>,
        stop: Arc<AtomicBool>,
    ) -> Result<RunStats> {
        self.run_internal(Some(events), Some(stop)).await
    }

    /// Inspect the run without calling any external service.
    ///
    /// Loads the word list and reports the resume decision and the active
    /// feature set. This is the `--dry-run` path.
    pub fn preflight(&self) -> Result<()> {
        let provider = WordProvider::load_seeded(
            &self.config.input_file,
            &self.config.output_file,
            self.config.shuffle_seed,
        )?;

        let mode = if provider.file_mode().is_append() {
            "append (resuming)"
        } else {
            "write (fresh)"
        };
        let images = if !self.config.generate_images {
            "disabled"
        } else if self.processor.images_enabled() {
            "enabled"
        } else {
            "disabled (Cloudflare credentials not set)"
        };

        info!("Input: {}", self.config.input_file.display());
        info!("Output: {} [{}]", self.config.output_file.display(), mode);
        info!("Words to process: {}", provider.len());
        info!("Model: {}", self.config.llm.model);
        info!("Target language: {}", self.config.target_language);
        info!(
            "Audio: {}",
            if self.config.generate_audio {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!("Images: {}", images);
        Ok(())
    }

    async fn run_internal(
        &self,
        events: Option<UnboundedSender<ProgressEvent>>,
        stop: Option<Arc<AtomicBool>>,
    ) -> Result<RunStats> {
        let start_time = std::time::Instant::now();

        let provider = WordProvider::load_seeded(
            &self.config.input_file,
            &self.config.output_file,
            self.config.shuffle_seed,
        )?;

        let total = provider.len();
        let resuming = provider.file_mode().is_append();

        if total == 0 {
            info!("All words already processed, nothing to do");
            emit(
                &events,
                ProgressEvent::Finished {
                    succeeded: 0,
                    failed: 0,
                    stopped: false,
                },
            );
            return Ok(RunStats {
                elapsed: start_time.elapsed(),
                ..RunStats::default()
            });
        }

        info!("🚀 ankiwort: {}", self.config.llm.model);
        if resuming {
            info!("Resuming: {} words left to process", total);
        } else {
            info!("Starting fresh run with {} words", total);
        }
        emit(&events, ProgressEvent::Started { total, resuming });

        let mut writer = DeckWriter::open(&self.config.output_file, provider.file_mode())?;

        // Progress bar only for interactive runs; event-driven runs report
        // through the channel instead.
        let progress = if events.is_none() {
            Some(build_progress_bar(total as u64))
        } else {
            None
        };

        let mut stats = RunStats {
            total_words: total,
            ..RunStats::default()
        };
        let mut stopped = false;

        for (index, word) in provider.into_words().enumerate() {
            if let Some(flag) = &stop {
                if flag.load(Ordering::Relaxed) {
                    warn!("Stop requested, ending run after {} words", index);
                    stopped = true;
                    break;
                }
            }

            let current = index + 1;
            emit(
                &events,
                ProgressEvent::WordStarted {
                    current,
                    total,
                    word: word.clone(),
                },
            );
            if let Some(pb) = &progress {
                pb.set_message(word.clone());
            }

            let success = match self.processor.process_word(&word).await {
                Ok(outcome) => {
                    writer.append_line(&outcome.line)?;
                    stats.token_usage.add(outcome.usage);
                    stats.succeeded += 1;
                    true
                }
                Err(error) => {
                    warn!("Failed to process '{}': {}", word, error);
                    stats.failed += 1;
                    stats.failed_words.push(word.clone());
                    false
                }
            };

            if let Some(pb) = &progress {
                pb.inc(1);
            }
            emit(
                &events,
                ProgressEvent::WordFinished {
                    current,
                    total,
                    word,
                    success,
                },
            );
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        stats.elapsed = start_time.elapsed();
        emit(
            &events,
            ProgressEvent::Finished {
                succeeded: stats.succeeded,
                failed: stats.failed,
                stopped,
            },
        );

        info!("Deck written to {}", writer.path().display());
        info!("{}", stats.summary());
        if stats.token_usage.total_tokens > 0 {
            info!("🔢 {}", stats.token_usage.summary());
        }

        Ok(stats)
    }
}

/// Send an event when a listener is attached. A dropped receiver only
/// means nobody is watching any more.
fn emit(events: &Option<UnboundedSender<ProgressEvent>>, event: ProgressEvent) {
    if let Some(sender) = events {
        let _ = sender.send(event);
    }
}

fn build_progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words ({percent}%) {msg} {eta}")
        .or_else(|_| {
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
        })
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style.progress_chars("█▓▒░"));
    progress
}

// Format duration in a human-readable format (HH:MM:SS)
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
