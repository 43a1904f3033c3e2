use std::time::Duration;

use reqwest::{Client, header};
use url::Url;

use crate::errors::ProviderError;

/// Endpoint of the free Google Translate speech service
const TRANSLATE_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// The service caps single requests around this length. Vocabulary words
/// are far below it, so there is no need for chunked requests.
const MAX_TEXT_LEN: usize = 200;

/// Text to speech client backed by Google Translate.
pub struct GttsClient {
    /// HTTP client for API requests
    client: Client,
    /// BCP-47 language of the spoken text, e.g. "de"
    language: String,
}

impl GttsClient {
    /// Create a client speaking the given language.
    pub fn new(language: impl Into<String>) -> Self {
        GttsClient {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            language: language.into(),
        }
    }

    /// Fetch MP3 audio for a short text.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::InvalidInput(
                "Cannot synthesize empty text".to_string(),
            ));
        }
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(ProviderError::InvalidInput(format!(
                "Text too long for a single TTS request ({} chars, limit {})",
                text.chars().count(),
                MAX_TEXT_LEN
            )));
        }

        let url = Url::parse_with_params(
            TRANSLATE_TTS_ENDPOINT,
            &[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", self.language.as_str()),
                ("client", "tw-ob"),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Failed to build TTS URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .header(
                header::USER_AGENT,
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
            )
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to send TTS request: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("TTS request rejected: {}", body),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            ProviderError::RequestFailed(format!("Failed to read TTS audio: {}", e))
        })?;
        if bytes.is_empty() {
            return Err(ProviderError::ParseError(
                "TTS reply carried no audio data".to_string(),
            ));
        }
        Ok(bytes.to_vec())
    }

    /// Language the client speaks
    pub fn language(&self) -> &str {
        &self.language
    }
}
