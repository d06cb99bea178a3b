//! Fake gateway provider for testing.
//!
//! Returns deterministic responses based on prompt matching, so tests run
//! without network access or API costs. Every call is recorded, which lets
//! tests assert which gateway calls were issued and what the prompts
//! embedded.

use super::{ImageAttachment, LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// One recorded gateway call.
#[derive(Debug, Clone)]
pub struct FakeCall {
    pub prompt: String,
    pub image: Option<ImageAttachment>,
}

/// A fake gateway provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring (case-insensitive). If no match is found, returns the default
/// response or an error. A forced API error takes precedence over any
/// registered response.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// If set, every call fails with this gateway error
    api_error: Option<(u16, String)>,
    /// Log of every call made, in order
    calls: Mutex<Vec<FakeCall>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
            api_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            api_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a FakeProvider whose every call fails like a gateway-reported
    /// error (e.g. an overloaded model).
    pub fn with_api_error(status: u16, message: &str) -> Self {
        let mut provider = Self::new();
        provider.api_error = Some((status, message.to_string()));
        provider
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, prompt: &str, image: Option<&ImageAttachment>) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(FakeCall {
            prompt: prompt.to_string(),
            image: image.cloned(),
        });

        if let Some((status, message)) = &self.api_error {
            return Err(LlmError::ApiError {
                status: *status,
                message: message.clone(),
            });
        }

        let responses = self.responses.read().unwrap();
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.respond(prompt, None)
    }

    async fn complete_with_image(
        &self,
        prompt: &str,
        image: &ImageAttachment,
    ) -> Result<String, LlmError> {
        self.respond(prompt, Some(image))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("hello", "world");
        let result = provider.complete("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("HELLO", "world");
        let result = provider.complete("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_records_calls() {
        let provider = FakeProvider::new().with_default_response("ok");
        provider.complete("first").await.unwrap();
        let image = ImageAttachment {
            media_type: "image/png".to_string(),
            data: "QUJD".to_string(),
        };
        provider.complete_with_image("second", &image).await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].prompt, "first");
        assert!(calls[0].image.is_none());
        assert_eq!(calls[1].image.as_ref().unwrap().media_type, "image/png");
    }

    #[tokio::test]
    async fn test_fake_provider_forced_api_error() {
        let provider = FakeProvider::with_api_error(529, "overloaded");
        let err = provider.complete("anything").await.unwrap_err();
        match err {
            LlmError::ApiError { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
