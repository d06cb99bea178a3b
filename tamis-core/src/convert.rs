//! The conversion operation: recipe in, Converted Recipe Document out.
//!
//! One public entry point, `convert_recipe`. Image mode costs two gateway
//! calls (transcription, then conversion); text and url modes cost one.
//! There are no retries and no partial results: either the whole document
//! parses or the whole request fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::ConvertedRecipeDocument;
use crate::llm::{ImageAttachment, LlmError, LlmProvider};
use crate::prompts::{render_convert_prompt, render_transcribe_prompt};

/// Which of the three input modalities the caller used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Text,
    Url,
    Image,
}

/// Request body of the convert endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// Pasted recipe text, or the recipe URL in url mode. Unused in image mode.
    #[serde(default)]
    pub recipe_text: String,
    pub input_mode: InputMode,
    #[serde(default)]
    pub image_data: Option<ImageAttachment>,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    /// An image-mode request arrived without image data.
    #[error("Image input requires imageData")]
    MissingImage,

    #[error(transparent)]
    Gateway(#[from] LlmError),

    #[error("Model reply was not a valid recipe document: {0}")]
    InvalidDocument(serde_json::Error),
}

impl ConvertError {
    /// The message surfaced to the caller. Gateway-reported errors surface
    /// the gateway's own message; everything else uses its Display form.
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::Gateway(LlmError::ApiError { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Convert a recipe to gluten-free via the gateway.
pub async fn convert_recipe(
    provider: &dyn LlmProvider,
    request: &ConvertRequest,
) -> Result<ConvertedRecipeDocument, ConvertError> {
    let recipe_text = match request.input_mode {
        InputMode::Image => {
            let image = request
                .image_data
                .as_ref()
                .ok_or(ConvertError::MissingImage)?;
            tracing::debug!(media_type = %image.media_type, "transcribing recipe image");
            provider
                .complete_with_image(&render_transcribe_prompt(), image)
                .await?
        }
        InputMode::Text | InputMode::Url => request.recipe_text.clone(),
    };

    let prompt = render_convert_prompt(&recipe_text);
    let reply = provider.complete(&prompt).await?;

    let cleaned = strip_code_fence(&reply);
    serde_json::from_str(cleaned).map_err(ConvertError::InvalidDocument)
}

/// Strip the ```json code fence the model sometimes wraps around its reply.
///
/// Removes an optional leading fence token and an optional trailing fence
/// token, then trims surrounding whitespace. With no fence present this is
/// a no-op beyond trimming, and applying it twice gives the same result.
pub fn strip_code_fence(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}
