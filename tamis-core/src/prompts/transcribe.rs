//! Prompt for transcribing a recipe photo into plain text.

pub const TRANSCRIBE_PROMPT_NAME: &str = "transcribe";

pub fn render_transcribe_prompt() -> String {
    "Extract the complete recipe from this image. Include the title, all \
     ingredients with amounts, and all instructions. Return only the recipe text."
        .to_string()
}
