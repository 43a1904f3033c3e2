/*!
 * Error types for the ankiwort application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when working with the generation APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error when the API rejects the request for exceeding its rate limit.
    /// Carries the wait the server asked for, when it communicated one.
    #[error("Rate limit exceeded{}", retry_after_suffix(.retry_after))]
    RateLimited {
        /// Server-suggested wait before retrying, if it sent one
        retry_after: Option<Duration>
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Error when the request payload cannot be sent as-is
    #[error("Invalid request input: {0}")]
    InvalidInput(String),
}

fn retry_after_suffix(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(" (retry after {:.1}s)", delay.as_secs_f64()),
        None => String::new(),
    }
}

impl ProviderError {
    /// Whether a request that failed with this error is worth repeating.
    /// Rate limits are handled separately and are not considered retryable here.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::RequestFailed(_) => true,
            ProviderError::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

/// Errors that can occur while generating the content for a single word
#[derive(Error, Debug)]
pub enum WordError {
    /// Error from the language model provider
    #[error("Language model error: {0}")]
    Llm(#[from] ProviderError),

    /// Error when the model responded but the reply lacked the required fields
    #[error("Language model returned no translation for \"{0}\"")]
    IncompleteData(String),

    /// Error after the retry budget for a word ran out
    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made before giving up
        attempts: u32,
        /// Message of the error that ended the retries
        last_error: String
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading or validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from word processing
    #[error("Word error: {0}")]
    Word(#[from] WordError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
