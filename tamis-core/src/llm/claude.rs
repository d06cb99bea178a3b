//! Claude (Anthropic) gateway provider.

use super::{ImageAttachment, LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Claude API provider.
#[derive(Debug)]
pub struct ClaudeProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Create a new ClaudeProvider with the given API key and model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    async fn send(&self, request: &ClaudeRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        extract_text(status, &body)
    }
}

/// Claude API request format.
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: ClaudeMessageContent,
}

/// A message body is either a plain string or a list of typed blocks.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ClaudeMessageContent {
    Text(String),
    Blocks(Vec<ClaudeContentBlock>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ClaudeContentBlock {
    Text { text: String },
    Image { source: ClaudeImageSource },
}

#[derive(Debug, Serialize)]
struct ClaudeImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

impl ClaudeImageSource {
    fn base64(image: &ImageAttachment) -> Self {
        Self {
            source_type: "base64".to_string(),
            media_type: image.media_type.clone(),
            data: image.data.clone(),
        }
    }
}

/// Claude API response format.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiError {
    message: String,
}

/// Error response from the Claude API.
#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
    error: ClaudeApiError,
}

/// Pull the reply text out of a raw gateway response body.
///
/// The gateway reports failures as an `error` object, occasionally under a
/// 200 status, so the error shape is checked before the content shape. The
/// reply text is the newline-joined concatenation of all text-typed content
/// blocks, in reply order.
fn extract_text(status: u16, body: &str) -> Result<String, LlmError> {
    if let Ok(error_response) = serde_json::from_str::<ClaudeErrorResponse>(body) {
        return Err(LlmError::ApiError {
            status,
            message: error_response.error.message,
        });
    }

    if status != 200 {
        return Err(LlmError::ApiError {
            status,
            message: body.to_string(),
        });
    }

    let response: ClaudeResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

    let blocks: Vec<String> = response
        .content
        .into_iter()
        .filter(|c| c.content_type == "text")
        .filter_map(|c| c.text)
        .collect();

    if blocks.is_empty() {
        return Err(LlmError::ParseError(
            "No text content in response".to_string(),
        ));
    }

    Ok(blocks.join("\n"))
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: ClaudeMessageContent::Text(prompt.to_string()),
            }],
        };

        self.send(&request).await
    }

    async fn complete_with_image(
        &self,
        prompt: &str,
        image: &ImageAttachment,
    ) -> Result<String, LlmError> {
        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: ClaudeMessageContent::Blocks(vec![
                    ClaudeContentBlock::Image {
                        source: ClaudeImageSource::base64(image),
                    },
                    ClaudeContentBlock::Text {
                        text: prompt.to_string(),
                    },
                ]),
            }],
        };

        self.send(&request).await
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
