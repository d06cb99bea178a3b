//! Prompt templates for the two gateway calls.

pub mod convert;
pub mod transcribe;

pub use convert::render_convert_prompt;
pub use transcribe::render_transcribe_prompt;
