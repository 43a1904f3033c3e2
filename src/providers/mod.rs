/*!
 * Provider clients for the external generation services.
 *
 * This module contains the HTTP clients the card pipeline talks to:
 * - Groq: chat completions for the linguistic content
 * - gTTS: Google Translate text to speech for pronunciation audio
 * - Cloudflare: Workers AI image generation for card illustrations
 */

use async_trait::async_trait;

use crate::errors::ProviderError;

pub use self::cloudflare::CloudflareImages;
pub use self::groq::{GroqClient, parse_retry_after};
pub use self::gtts::GttsClient;

/// Token counts reported by the chat API for one request
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Tokens in the generated reply
    #[serde(default)]
    pub completion_tokens: u64,
    /// Prompt and reply combined
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Fold another request's counts into this one
    pub fn add(&mut self, other: TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }

    /// Generate a one line summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token usage: {} total ({} prompt, {} completion)",
            self.total_tokens, self.prompt_tokens, self.completion_tokens
        )
    }
}

/// A chat reply together with its token accounting
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The reply text
    pub text: String,
    /// Token usage for the request, zeroed when the API omitted it
    pub usage: TokenUsage,
}

/// Common interface for chat completion backends
///
/// The word processor only needs a system prompt, a user prompt and a
/// completion budget, which keeps the retry logic testable against a
/// scripted stand-in.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run one chat completion
    ///
    /// # Arguments
    /// * `system_prompt` - Instructions for the model
    /// * `user_prompt` - The user turn carrying the word or content
    /// * `max_tokens` - Completion budget for the reply
    ///
    /// # Returns
    /// * `Result<ChatOutcome, ProviderError>` - The reply or a typed error
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<ChatOutcome, ProviderError>;
}

pub mod cloudflare;
pub mod groq;
pub mod gtts;
