//! Live adapter for the `OpenAI` image generation API.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ImageError;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest, ImageResponse,
};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/images/generations";

/// Live `OpenAI` image generator that calls the `OpenAI` Images API.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
}

impl OpenAiGenerator {
    /// Create a new `OpenAI` generator with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

impl ImageGenerator for OpenAiGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let body = serde_json::json!({
                "model": request.model,
                "prompt": request.prompt,
                "n": 1,
                "size": request.size,
            });

            let response = self
                .client
                .post(OPENAI_API_URL)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ImageError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: OpenAiResponse = serde_json::from_str(&response_text).map_err(|e| {
                ImageError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let mut images = Vec::new();
            for item in parsed.data {
                images.push(self.resolve_image(item).await?);
            }

            if images.is_empty() {
                let truncated = if response_text.len() > 500 {
                    format!("{}...", &response_text[..500])
                } else {
                    response_text.clone()
                };
                return Err(ImageError::Api {
                    status: 200,
                    message: format!("No images in response. Body: {truncated}"),
                });
            }

            Ok(ImageResponse { images })
        })
    }
}

impl OpenAiGenerator {
    /// Turn one response item into image bytes.
    ///
    /// The API returns either an inline base64 payload or a download URL,
    /// depending on the model.
    async fn resolve_image(&self, item: OpenAiImageData) -> Result<GeneratedImage, ImageError> {
        if let Some(encoded) = item.b64_json {
            let data =
                base64::engine::general_purpose::STANDARD.decode(&encoded).map_err(|e| {
                    ImageError::Api { status: 200, message: format!("Failed to decode base64: {e}") }
                })?;
            return Ok(GeneratedImage { data, mime_type: "image/png".to_string() });
        }

        if let Some(url) = item.url {
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ImageError::Api {
                    status: status.as_u16(),
                    message: format!("Failed to download image from {url}"),
                });
            }
            let mime_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map_or_else(|| "image/png".to_string(), ToString::to_string);
            let data = response.bytes().await?.to_vec();
            return Ok(GeneratedImage { data, mime_type });
        }

        Err(ImageError::Api { status: 200, message: "No image payload in response".to_string() })
    }
}

// --- OpenAI API response types ---

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}
