use std::time::Duration;

use async_trait::async_trait;
use log::{error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::ProviderError;
use crate::providers::{ChatClient, ChatOutcome, TokenUsage};
use crate::rate_limit::TokenBucket;

/// Pattern Groq uses in rate limit bodies, e.g. "try again in 7m12.34s"
static RETRY_AFTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"try again in (?:(\d+)m)?(\d{1,3}(?:\.\d+)?)s").unwrap()
});

/// Groq client for the OpenAI compatible chat completions API.
///
/// Requests pass through a client-side token bucket before they go out,
/// so steady load stays under the account's request budget instead of
/// bouncing off 429 responses.
pub struct GroqClient {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Model identifier
    model: String,
    /// Sampling temperature for all requests
    temperature: f32,
    /// Client-side request pacing
    limiter: Mutex<TokenBucket>,
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// The model to use
    model: String,
    /// The conversation so far
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    temperature: f32,
    /// Completion budget
    max_tokens: u32,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    role: String,
    /// Content of the message
    content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Generated choices, first one carries the reply
    choices: Vec<ChatChoice>,
    /// Token accounting, not always present
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl GroqClient {
    /// Public Groq API endpoint
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.groq.com/openai/v1";

    /// Create a client with the default endpoint, temperature and pacing.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        GroqClient {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            temperature: 0.3,
            limiter: Mutex::new(TokenBucket::new(30, 0.5)),
        }
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replace the request pacing bucket
    pub fn with_rate_limit(mut self, bucket: TokenBucket) -> Self {
        self.limiter = Mutex::new(bucket);
        self
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatOutcome, ProviderError> {
        // Pace the request first. Blocking consume always succeeds.
        self.limiter.lock().await.consume(1, true).await;

        let api_url = format!(
            "{}/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&api_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to send request to Groq API: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let from_header = header_retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            let retry_after = from_header.or_else(|| parse_retry_after(&body));
            warn!("Groq API rate limited the request: {}", body);
            return Err(ProviderError::RateLimited { retry_after });
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationError(format!(
                "Groq API rejected the key ({}): {}",
                status, body
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Groq API error ({}): {}", status, body);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let parsed = response.json::<ChatResponse>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse Groq API response: {}", e))
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::ParseError("Groq reply contained no choices".to_string())
            })?;

        Ok(ChatOutcome {
            text,
            usage: parsed.usage.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ChatClient for GroqClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<ChatOutcome, ProviderError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens,
        };
        self.complete(request).await
    }
}

/// Extract the wait the server asked for from a rate limit message body.
///
/// Understands the "try again in XmY.Zs" phrasing, adds one second of
/// slack and never reports less than a second. Returns None when the
/// message carries no recognizable delay.
pub fn parse_retry_after(detail: &str) -> Option<Duration> {
    let caps = RETRY_AFTER_PATTERN.captures(detail)?;
    let minutes: u64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let seconds: f64 = caps.get(2)?.as_str().parse().ok()?;
    let total = (minutes as f64 * 60.0 + seconds + 1.0).max(1.0);
    Some(Duration::from_secs_f64(total))
}

/// Numeric Retry-After header, when the server set one
fn header_retry_after(headers: &header::HeaderMap) -> Option<Duration> {
    let raw = headers.get(header::RETRY_AFTER)?.to_str().ok()?;
    let secs: f64 = raw.trim().parse().ok()?;
    (secs >= 0.0).then(|| Duration::from_secs_f64(secs))
}
