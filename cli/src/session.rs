//! Client-side conversion session.
//!
//! Holds all state for one conversion flow: which input mode is active,
//! the collected inputs, the in-flight flag, and the result-or-error slot.
//! The transitions guarantee a submitted payload never mixes stale data
//! from a previous mode, and that a failure replaces any previous result.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use tamis_core::convert::{ConvertRequest, InputMode};
use tamis_core::document::ConvertedRecipeDocument;
use tamis_core::llm::ImageAttachment;

/// Error body returned by the conversion service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub struct ConverterSession {
    server: String,
    input_mode: InputMode,
    recipe_input: String,
    image_file: Option<PathBuf>,
    loading: bool,
    converted_recipe: Option<ConvertedRecipeDocument>,
    error: Option<String>,
}

impl ConverterSession {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            input_mode: InputMode::Text,
            recipe_input: String::new(),
            image_file: None,
            loading: false,
            converted_recipe: None,
            error: None,
        }
    }

    /// Switch input mode, clearing the other modes' inputs and any error.
    /// A previously displayed result survives until the next submit.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        match mode {
            InputMode::Text | InputMode::Url => self.image_file = None,
            InputMode::Image => self.recipe_input.clear(),
        }
        self.error = None;
    }

    pub fn set_recipe_input(&mut self, input: impl Into<String>) {
        self.recipe_input = input.into();
    }

    pub fn set_image_file(&mut self, path: impl Into<PathBuf>) {
        self.image_file = Some(path.into());
        self.error = None;
    }

    pub fn converted_recipe(&self) -> Option<&ConvertedRecipeDocument> {
        self.converted_recipe.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submit is currently allowed: never while one is in flight,
    /// and only with a selected file (image mode) or non-whitespace input
    /// (text/url modes).
    pub fn can_submit(&self) -> bool {
        if self.loading {
            return false;
        }
        match self.input_mode {
            InputMode::Image => self.image_file.is_some(),
            InputMode::Text | InputMode::Url => !self.recipe_input.trim().is_empty(),
        }
    }

    /// Run one conversion against the service. Returns true on success.
    ///
    /// On success the document replaces any previous error; on failure the
    /// error message replaces any previous document. The loading flag is
    /// cleared on every path.
    pub async fn submit(&mut self) -> bool {
        self.loading = true;
        self.error = None;

        match self.request().await {
            Ok(document) => {
                self.converted_recipe = Some(document);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
                self.converted_recipe = None;
            }
        }

        self.loading = false;
        self.error.is_none()
    }

    async fn request(&self) -> Result<ConvertedRecipeDocument, String> {
        let image_data = match (self.input_mode, &self.image_file) {
            (InputMode::Image, Some(path)) => Some(read_image(path)?),
            _ => None,
        };

        let request = ConvertRequest {
            recipe_text: self.recipe_input.clone(),
            input_mode: self.input_mode,
            image_data,
        };

        let response = reqwest::Client::new()
            .post(format!("{}/api/convert", self.server))
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("Conversion failed with status {status}"));
            return Err(message);
        }

        response
            .json::<ConvertedRecipeDocument>()
            .await
            .map_err(|e| e.to_string())
    }
}

/// Read a photo from disk, validate it, and base64-encode it for upload.
fn read_image(path: &Path) -> Result<ImageAttachment, String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let media_type = tamis_core::image::validate_photo(&bytes).map_err(|e| e.to_string())?;
    Ok(ImageAttachment {
        media_type,
        data: BASE64.encode(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tamis_core::document::Feasibility;

    fn sample_document() -> ConvertedRecipeDocument {
        ConvertedRecipeDocument {
            recipe_title: "Flatbread".to_string(),
            recipe_type: "bread".to_string(),
            feasibility: Feasibility::Easy,
            feasibility_note: "Simple swap.".to_string(),
            ingredients: vec![],
            swap_options: vec![],
            instructions: vec![],
            notes: Default::default(),
            brand_recommendations: vec![],
            additional_tips: None,
        }
    }

    #[test]
    fn test_switching_away_from_image_clears_the_file() {
        let mut session = ConverterSession::new("http://localhost:3000");
        session.set_mode(InputMode::Image);
        session.set_image_file("recipe.jpg");

        session.set_mode(InputMode::Text);
        assert!(session.image_file.is_none());
    }

    #[test]
    fn test_switching_to_image_clears_the_text_input() {
        let mut session = ConverterSession::new("http://localhost:3000");
        session.set_recipe_input("2 cups flour");

        session.set_mode(InputMode::Image);
        assert!(session.recipe_input.is_empty());
    }

    #[test]
    fn test_mode_switch_clears_error_but_keeps_result() {
        let mut session = ConverterSession::new("http://localhost:3000");
        session.converted_recipe = Some(sample_document());
        session.error = Some("previous failure".to_string());

        session.set_mode(InputMode::Url);
        assert!(session.error().is_none());
        assert!(session.converted_recipe().is_some());
    }

    #[test]
    fn test_can_submit_requires_non_whitespace_text() {
        let mut session = ConverterSession::new("http://localhost:3000");
        assert!(!session.can_submit());

        session.set_recipe_input("   \n\t");
        assert!(!session.can_submit());

        session.set_recipe_input("2 cups flour");
        assert!(session.can_submit());
    }

    #[test]
    fn test_can_submit_requires_a_file_in_image_mode() {
        let mut session = ConverterSession::new("http://localhost:3000");
        session.set_mode(InputMode::Image);
        assert!(!session.can_submit());

        session.set_image_file("recipe.jpg");
        assert!(session.can_submit());
    }

    #[test]
    fn test_can_submit_is_false_while_loading() {
        let mut session = ConverterSession::new("http://localhost:3000");
        session.set_recipe_input("2 cups flour");
        session.loading = true;
        assert!(!session.can_submit());
    }

    #[tokio::test]
    async fn test_failed_submit_stores_error_and_drops_previous_result() {
        // Port 1 refuses connections, so the request fails at the transport.
        let mut session = ConverterSession::new("http://127.0.0.1:1");
        session.set_recipe_input("2 cups flour");
        session.converted_recipe = Some(sample_document());

        let ok = session.submit().await;
        assert!(!ok);
        assert!(session.error().is_some());
        assert!(session.converted_recipe().is_none());
        assert!(!session.loading, "loading is cleared on failure");
        assert!(session.can_submit(), "a new submit is allowed afterwards");
    }
}
