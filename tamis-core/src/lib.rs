//! Core library for the Tamis gluten-free recipe converter.
//!
//! The interesting work — the adaptation itself — happens inside an external
//! model. This crate owns everything around it: the document schema the
//! model is asked to produce, the gateway client, the prompts, and the
//! reply cleanup and fail-closed decode.

pub mod convert;
pub mod document;
pub mod image;
pub mod llm;
pub mod prompts;

pub use convert::{convert_recipe, strip_code_fence, ConvertError, ConvertRequest, InputMode};
pub use document::{
    BrandRecommendation, ConvertedRecipeDocument, Feasibility, IngredientLine, SwapGroup,
    SwapOption,
};
pub use image::{validate_photo, ImageError, MAX_FILE_SIZE};
pub use llm::{
    create_provider_from_env, ClaudeProvider, FakeProvider, ImageAttachment, LlmError, LlmProvider,
};
