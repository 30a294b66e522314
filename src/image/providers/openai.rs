//! OpenAI image generation provider (dall-e-3, gpt-image-1).

use crate::error::{GenSheetError, Result};
use crate::image::provider::ImageProvider;
use crate::image::types::{GeneratedImage, GenerationRequest, ImageSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default API base, overridable with `OPENAI_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Builder for OpenAiImageProvider.
#[derive(Debug, Clone, Default)]
pub struct OpenAiImageProviderBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl OpenAiImageProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API base URL. Falls back to `OPENAI_BASE_URL`, then
    /// [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout (default 300s). Applies to the
    /// generation call and to the URL fallback download separately.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<OpenAiImageProvider> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GenSheetError::MissingCredential(API_KEY_ENV.into()))?;

        let base_url = self
            .base_url
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(OpenAiImageProvider {
            client,
            api_key,
            generations_url: format!("{}/images/generations", base_url.trim_end_matches('/')),
        })
    }
}

/// OpenAI image generation provider.
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: String,
    generations_url: String,
}

impl OpenAiImageProvider {
    /// Creates a new `OpenAiImageProviderBuilder`.
    pub fn builder() -> OpenAiImageProviderBuilder {
        OpenAiImageProviderBuilder::new()
    }

    /// Returns the full generations endpoint this provider posts to.
    pub fn generations_url(&self) -> &str {
        &self.generations_url
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let failed = |reason: String| GenSheetError::Download {
            url: url.to_string(),
            reason,
        };

        tracing::debug!(url = %url, "downloading image from returned URL");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status.as_u16())));
        }

        let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let start = Instant::now();
        let body = OpenAiImageRequest::from_generation_request(request);

        tracing::debug!(model = %request.model, size = %request.size, "submitting image request");
        let response = self
            .client
            .post(&self.generations_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenSheetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let (data, source) = match extract_payload(&text)? {
            ImagePayload::Inline(data) => (data, ImageSource::Inline),
            ImagePayload::Url(url) => (self.download(&url).await?, ImageSource::Url),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(bytes = data.len(), ?source, duration_ms, "image received");

        Ok(GeneratedImage::new(
            data,
            source,
            request.model.clone(),
            duration_ms,
        ))
    }

    fn name(&self) -> &str {
        "OpenAI Images"
    }
}

/// What a successful response body points at.
#[derive(Debug, PartialEq, Eq)]
enum ImagePayload {
    Inline(Vec<u8>),
    Url(String),
}

/// Pulls the first image out of a 2xx response body. Inline base64 wins over
/// a URL; a body with neither is a protocol error.
fn extract_payload(text: &str) -> Result<ImagePayload> {
    let response: OpenAiImageResponse =
        serde_json::from_str(text).map_err(|_| GenSheetError::unexpected(text))?;

    let first = response.data.into_iter().next().unwrap_or_default();

    if let Some(b64) = first.b64_json.filter(|s| !s.is_empty()) {
        let data = decode_base64(&b64).map_err(|e| GenSheetError::Decode(e.to_string()))?;
        return Ok(ImagePayload::Inline(data));
    }

    if let Some(url) = first.url.filter(|s| !s.is_empty()) {
        return Ok(ImagePayload::Url(url));
    }

    Err(GenSheetError::unexpected(text))
}

/// Decodes base64 that may be wrapped across lines.
fn decode_base64(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    use base64::Engine;

    let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD.decode(cleaned)
}

#[derive(Debug, Serialize)]
struct OpenAiImageRequest {
    model: String,
    prompt: String,
    size: String,
    n: u32,
    quality: String,
    style: String,
}

impl OpenAiImageRequest {
    fn from_generation_request(req: &GenerationRequest) -> Self {
        Self {
            model: req.model.clone(),
            prompt: req.prompt.clone(),
            size: req.size.clone(),
            n: 1,
            quality: req.quality.clone(),
            style: req.style.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiImageResponse {
    #[serde(default)]
    data: Vec<OpenAiImageData>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    b64_json: Option<String>,
}
