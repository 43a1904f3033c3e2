use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::error;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;

/// Workers AI model used for card illustrations
const MODEL_PATH: &str = "@cf/black-forest-labs/flux-1-schnell";

/// Image generation client for Cloudflare Workers AI.
pub struct CloudflareImages {
    /// HTTP client for API requests, capped at 60s per image
    client: Client,
    /// Account scoped model endpoint
    endpoint: String,
    /// API token for authentication
    api_token: String,
}

/// Image generation request
#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    /// The prompt describing the wanted illustration
    prompt: &'a str,
}

/// Image generation response envelope
#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    result: Option<ImageResult>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    /// Base64 encoded PNG
    #[serde(default)]
    image: Option<String>,
}

impl CloudflareImages {
    /// Create a client for the given account.
    pub fn new(account_id: &str, api_token: impl Into<String>) -> Self {
        CloudflareImages {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            endpoint: format!(
                "https://api.cloudflare.com/client/v4/accounts/{}/ai/run/{}",
                account_id, MODEL_PATH
            ),
            api_token: api_token.into(),
        }
    }

    /// Generate one PNG for a prompt and return the decoded bytes.
    pub async fn generate_png(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        if prompt.trim().is_empty() {
            return Err(ProviderError::InvalidInput(
                "Cannot generate an image for an empty prompt".to_string(),
            ));
        }

        let request = ImageRequest { prompt };
        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_token))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!(
                    "Failed to send request to Cloudflare AI: {}",
                    e
                ))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationError(format!(
                "Cloudflare AI rejected the token ({}): {}",
                status, body
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Cloudflare AI error ({}): {}", status, body);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let parsed = response.json::<ImageResponse>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse Cloudflare AI response: {}", e))
        })?;

        let image_b64 = parsed
            .result
            .and_then(|result| result.image)
            .ok_or_else(|| {
                ProviderError::ParseError("Cloudflare AI reply carried no image data".to_string())
            })?;

        STANDARD.decode(image_b64.as_bytes()).map_err(|e| {
            ProviderError::ParseError(format!("Image data was not valid base64: {}", e))
        })
    }
}
