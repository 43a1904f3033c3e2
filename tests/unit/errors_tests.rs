/*!
 * Tests for the error types
 */

use std::time::Duration;

use ankiwort::errors::{AppError, ProviderError, WordError};

/// Test the display format of provider errors
#[test]
fn test_provider_error_display_shouldMatchFormat() {
    assert_eq!(
        ProviderError::RequestFailed("boom".to_string()).to_string(),
        "API request failed: boom"
    );
    assert_eq!(
        ProviderError::ParseError("bad json".to_string()).to_string(),
        "Failed to parse API response: bad json"
    );
    assert_eq!(
        ProviderError::ApiError {
            status_code: 500,
            message: "oops".to_string()
        }
        .to_string(),
        "API responded with error: 500 - oops"
    );
    assert_eq!(
        ProviderError::AuthenticationError("bad key".to_string()).to_string(),
        "Authentication error: bad key"
    );
    assert_eq!(
        ProviderError::InvalidInput("empty".to_string()).to_string(),
        "Invalid request input: empty"
    );
}

/// Test that the rate limit display mentions the wait only when known
#[test]
fn test_rate_limited_display_shouldMentionWaitWhenKnown() {
    assert_eq!(
        ProviderError::RateLimited { retry_after: None }.to_string(),
        "Rate limit exceeded"
    );
    assert_eq!(
        ProviderError::RateLimited {
            retry_after: Some(Duration::from_secs_f64(2.5))
        }
        .to_string(),
        "Rate limit exceeded (retry after 2.5s)"
    );
}

/// Test which provider errors are worth retrying
#[test]
fn test_is_retryable_shouldMatchErrorClass() {
    assert!(ProviderError::RequestFailed("timeout".to_string()).is_retryable());
    assert!(ProviderError::ApiError {
        status_code: 500,
        message: "server".to_string()
    }
    .is_retryable());
    assert!(ProviderError::ApiError {
        status_code: 503,
        message: "unavailable".to_string()
    }
    .is_retryable());

    assert!(!ProviderError::ApiError {
        status_code: 400,
        message: "bad request".to_string()
    }
    .is_retryable());
    assert!(!ProviderError::AuthenticationError("key".to_string()).is_retryable());
    assert!(!ProviderError::ParseError("json".to_string()).is_retryable());
    // Rate limits carry their own wait and are handled separately
    assert!(!ProviderError::RateLimited { retry_after: None }.is_retryable());
    assert!(!ProviderError::InvalidInput("empty".to_string()).is_retryable());
}

/// Test the display format of word errors
#[test]
fn test_word_error_display_shouldMatchFormat() {
    assert_eq!(
        WordError::IncompleteData("Haus".to_string()).to_string(),
        "Language model returned no translation for \"Haus\""
    );
    assert_eq!(
        WordError::RetriesExhausted {
            attempts: 3,
            last_error: "API request failed: timeout".to_string()
        }
        .to_string(),
        "Gave up after 3 attempts: API request failed: timeout"
    );
}

/// Test that provider errors convert into word errors
#[test]
fn test_word_error_from_provider_error_shouldWrap() {
    let error: WordError = ProviderError::RequestFailed("boom".to_string()).into();

    assert!(matches!(error, WordError::Llm(_)));
    assert_eq!(error.to_string(), "Language model error: API request failed: boom");
}

/// Test the conversions into the application error
#[test]
fn test_app_error_conversions_shouldPickVariant() {
    let from_provider: AppError = ProviderError::RateLimited { retry_after: None }.into();
    assert!(matches!(from_provider, AppError::Provider(_)));
    assert_eq!(from_provider.to_string(), "Provider error: Rate limit exceeded");

    let from_word: AppError = WordError::IncompleteData("Haus".to_string()).into();
    assert!(matches!(from_word, AppError::Word(_)));

    let from_io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(_)));
    assert_eq!(from_io.to_string(), "File error: gone");

    let from_anyhow: AppError = anyhow::anyhow!("odd state").into();
    assert!(matches!(from_anyhow, AppError::Unknown(_)));
    assert_eq!(from_anyhow.to_string(), "Unknown error: odd state");
}
