/*!
 * Per-word generation pipeline.
 *
 * For each word this runs the chat model with bounded retries, optionally
 * fetches pronunciation audio and an illustration, and assembles the final
 * deck line. Media failures are logged and cost only the tag; a text
 * failure fails the word.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{debug, warn};
use tokio::time::sleep;

use crate::app_config::Config;
use crate::cards::{self, WordData, prompts};
use crate::errors::{ProviderError, WordError};
use crate::file_utils::{FileManager, sanitize_filename};
use crate::language_utils;
use crate::providers::{ChatClient, CloudflareImages, GttsClient, TokenUsage};

/// Ceiling for the exponential retry backoff
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Spoken language of the vocabulary, fixed by the card format
const AUDIO_LANGUAGE: &str = "de";

/// A finished card line plus the tokens it cost
#[derive(Debug)]
pub struct WordOutcome {
    /// The assembled deck line, ready for the deck file
    pub line: String,
    /// Chat token usage across content and translation requests
    pub usage: TokenUsage,
}

/// Turns single words into finished deck lines.
pub struct WordProcessor {
    chat: Arc<dyn ChatClient>,
    tts: GttsClient,
    images: Option<CloudflareImages>,
    /// Resolved English name of the card front language
    target_language: String,
    generate_audio: bool,
    audio_dir: PathBuf,
    image_dir: PathBuf,
    anki_media_dir: Option<PathBuf>,
    max_tokens: u32,
    translation_max_tokens: u32,
    retry_count: u32,
    backoff_base: Duration,
    rate_limit_fallback: Duration,
}

impl WordProcessor {
    /// Build a processor from the configuration and a chat backend.
    ///
    /// The image client only comes to life when images are enabled and
    /// the Cloudflare credentials are present.
    pub fn from_config(config: &Config, chat: Arc<dyn ChatClient>) -> Result<Self> {
        let target_language = language_utils::resolve_language_name(&config.target_language)?;
        let images = if config.generate_images {
            config
                .credentials
                .cloudflare()
                .map(|(account, token)| CloudflareImages::new(account, token))
        } else {
            None
        };

        Ok(WordProcessor {
            chat,
            tts: GttsClient::new(AUDIO_LANGUAGE),
            images,
            target_language,
            generate_audio: config.generate_audio,
            audio_dir: config.audio_output_dir.clone(),
            image_dir: config.image_output_dir.clone(),
            anki_media_dir: config.anki_media_dir.clone(),
            max_tokens: config.llm.max_tokens,
            translation_max_tokens: config.llm.translation_max_tokens,
            retry_count: config.llm.retry_count,
            backoff_base: Duration::from_millis(config.llm.retry_backoff_ms),
            rate_limit_fallback: Duration::from_secs(config.llm.rate_limit_retry_secs),
        })
    }

    /// Whether the processor will attempt card illustrations
    pub fn images_enabled(&self) -> bool {
        self.images.is_some()
    }

    /// Generate the full card line for one word.
    pub async fn process_word(&self, word: &str) -> Result<WordOutcome, WordError> {
        let mut usage = TokenUsage::default();

        let mut data = self.generate_text(word, &mut usage).await?;
        if !data.has_translation() {
            return Err(WordError::IncompleteData(word.to_string()));
        }

        if !self.target_language.eq_ignore_ascii_case("english") {
            data = self.translate_content(data, &mut usage).await;
        }

        let card = cards::format_card(&data);
        let img_tag = self.generate_image(&data).await;
        let audio_tag = if self.generate_audio {
            self.generate_audio_tag(word).await
        } else {
            String::new()
        };

        Ok(WordOutcome {
            line: cards::assemble_line(&card, &img_tag, &audio_tag),
            usage,
        })
    }

    /// Run the content request with bounded retries.
    ///
    /// Rate limited requests wait for the server-suggested delay, or the
    /// configured fallback when the server gave none. Transient transport
    /// and 5xx errors back off exponentially. Everything else fails the
    /// word immediately.
    async fn generate_text(&self, word: &str, usage: &mut TokenUsage) -> Result<WordData, WordError> {
        let system_prompt = prompts::select_system_prompt(word);
        let user_prompt = prompts::user_prompt(word);

        let mut attempt: u32 = 0;
        loop {
            match self.chat.chat(system_prompt, &user_prompt, self.max_tokens).await {
                Ok(outcome) => {
                    usage.add(outcome.usage);
                    return Ok(cards::parse_reply(word, &outcome.text));
                }
                Err(error) => {
                    attempt += 1;
                    let delay = match &error {
                        ProviderError::RateLimited { retry_after } => {
                            retry_after.unwrap_or(self.rate_limit_fallback)
                        }
                        other if other.is_retryable() => backoff_delay(self.backoff_base, attempt),
                        _ => return Err(WordError::Llm(error)),
                    };
                    if attempt > self.retry_count {
                        return Err(WordError::RetriesExhausted {
                            attempts: attempt,
                            last_error: error.to_string(),
                        });
                    }
                    warn!(
                        "Attempt {}/{} for '{}' failed: {}. Retrying in {:.1}s",
                        attempt,
                        self.retry_count,
                        word,
                        error,
                        delay.as_secs_f64()
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    /// Translate the English card content into the target language.
    /// Best effort: on failure the English content is kept.
    async fn translate_content(&self, data: WordData, usage: &mut TokenUsage) -> WordData {
        let system_prompt = prompts::translation_prompt(&data, &self.target_language);
        let user_prompt = prompts::translation_user_prompt(&self.target_language);

        match self
            .chat
            .chat(&system_prompt, &user_prompt, self.translation_max_tokens)
            .await
        {
            Ok(outcome) => {
                usage.add(outcome.usage);
                cards::parse_translated_reply(data, &outcome.text)
            }
            Err(error) => {
                warn!(
                    "Translation to {} failed for '{}': {}. Keeping English content",
                    self.target_language, data.word, error
                );
                data
            }
        }
    }

    /// Fetch or reuse the pronunciation clip. Failures only cost the tag.
    async fn generate_audio_tag(&self, word: &str) -> String {
        let file_name = format!("{}.mp3", sanitize_filename(word));
        let path = self.audio_dir.join(&file_name);

        if FileManager::file_exists(&path) {
            debug!("Audio file already exists: {}", path.display());
        } else {
            let bytes = match self.tts.synthesize(word).await {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!("Audio generation failed for '{}': {}", word, error);
                    return String::new();
                }
            };
            if let Err(error) = FileManager::write_bytes(&path, &bytes) {
                warn!("Could not save audio for '{}': {}", word, error);
                return String::new();
            }
            debug!("Audio saved to {}", path.display());
        }

        self.copy_to_anki_media(&path);
        cards::sound_tag(&file_name)
    }

    /// Fetch or reuse the illustration. Failures only cost the tag.
    async fn generate_image(&self, data: &WordData) -> String {
        let images = match &self.images {
            Some(images) => images,
            None => return String::new(),
        };

        let file_name = format!("{}.png", sanitize_filename(&data.word));
        let path = self.image_dir.join(&file_name);

        if FileManager::file_exists(&path) {
            debug!("Image file already exists: {}", path.display());
        } else {
            let prompt = prompts::illustration_prompt(&data.word_translation, &data.translation);
            let bytes = match images.generate_png(&prompt).await {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!("Image generation failed for '{}': {}", data.word, error);
                    return String::new();
                }
            };
            if let Err(error) = FileManager::write_bytes(&path, &bytes) {
                warn!("Could not save image for '{}': {}", data.word, error);
                return String::new();
            }
            debug!("Image saved to {}", path.display());
        }

        self.copy_to_anki_media(&path);
        cards::image_tag(&file_name)
    }

    /// Best effort copy into the Anki media collection
    fn copy_to_anki_media(&self, file: &Path) {
        if let Some(media_dir) = &self.anki_media_dir {
            if let Err(error) = FileManager::copy_into_dir(file, media_dir) {
                warn!(
                    "Failed to copy {} to Anki media: {}",
                    file.display(),
                    error
                );
            }
        }
    }
}

/// Doubling backoff from the base delay, capped at [`MAX_BACKOFF`].
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let shift = attempt.saturating_sub(1).min(6);
    (base * (1u32 << shift)).min(MAX_BACKOFF)
}
