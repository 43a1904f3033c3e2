/*!
 * # ankiwort - AI-powered Anki deck generator for German vocabulary
 *
 * A Rust library that turns a plain list of German words into an
 * Anki-importable flashcard deck.
 *
 * ## Features
 *
 * - Generate card content (translation, example sentence, grammar notes)
 *   with the Groq chat-completions API
 * - Optional translation of the card front into any ISO 639 language
 * - Pronunciation audio through the Google Translate TTS endpoint
 * - AI-generated card illustrations through Cloudflare Workers AI
 * - Resumable runs: words already present in the deck file are skipped
 * - Client-side token-bucket rate limiting with retry-after handling
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `word_provider`: Word list loading, shuffling and resume filtering
 * - `rate_limit`: Token-bucket rate limiter for API calls
 * - `cards`: Card data model, prompts, response parsing and formatting:
 *   - `cards::model`: Word data and grammatical types
 *   - `cards::prompts`: System prompt selection and templates
 *   - `cards::parser`: LLM reply parsing
 *   - `cards::format`: Deck line assembly
 * - `word_processor`: Per-word generation pipeline with retries
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the external services:
 *   - `providers::groq`: Groq chat-completions client
 *   - `providers::gtts`: Google Translate TTS client
 *   - `providers::cloudflare`: Cloudflare Workers AI image client
 * - `file_utils`: File system operations and the deck writer
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Add other lints you want to allow but not auto-fix

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod cards;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod rate_limit;
pub mod word_processor;
pub mod word_provider;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ProgressEvent, RunStats};
pub use errors::{AppError, ProviderError, WordError};
pub use file_utils::sanitize_filename;
pub use language_utils::resolve_language_name;
pub use rate_limit::TokenBucket;
pub use word_provider::{FileMode, WordProvider};
