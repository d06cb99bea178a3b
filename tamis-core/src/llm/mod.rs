//! Model Gateway abstraction.
//!
//! The gateway performs both jobs this system delegates to a model: reading
//! a recipe out of a photo, and converting a recipe to gluten-free. This
//! module provides a trait-based abstraction over it with a live Claude
//! implementation and a fake for tests.

mod claude;
mod fake;

pub use claude::ClaudeProvider;
pub use fake::{FakeCall, FakeProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for gateway operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// An image handed to the gateway: MIME type plus base64 payload.
///
/// This is also the `imageData` shape of the convert endpoint's request
/// body, so it serializes with `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImageAttachment {
    /// MIME type, e.g. "image/jpeg".
    #[serde(rename = "type")]
    pub media_type: String,
    /// Base64-encoded image bytes, no data-URL prefix.
    pub data: String,
}

/// Trait for gateway providers.
///
/// Implementations are stateless and thread-safe; each call is a single-turn
/// request with no conversation state, no retries, and no caching.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a text prompt and get the model's text reply.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Send a prompt with one attached image and get the model's text reply.
    async fn complete_with_image(
        &self,
        prompt: &str,
        image: &ImageAttachment,
    ) -> Result<String, LlmError>;

    /// Provider name (e.g. "claude", "fake").
    fn provider_name(&self) -> &'static str;

    /// Model name (e.g. "claude-sonnet-4-20250514").
    fn model_name(&self) -> &str;
}

/// Default model when `TAMIS_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Build a provider from environment variables.
///
/// - `TAMIS_PROVIDER`: "claude" (default) | "fake"
/// - `ANTHROPIC_API_KEY`: API key, required for the claude provider
/// - `TAMIS_MODEL`: model name override
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider = std::env::var("TAMIS_PROVIDER").unwrap_or_else(|_| "claude".to_string());

    match provider.as_str() {
        "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY")
                .map_err(|_| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;
            let model = std::env::var("TAMIS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
            Ok(Box::new(ClaudeProvider::new(api_key, model)))
        }
        "fake" => Ok(Box::new(FakeProvider::default())),
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
