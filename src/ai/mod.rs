//! AI text generation.
//!
//! The pipeline only depends on [`TextGenerator`]; [`GeminiClient`] is the
//! production implementation.

mod gemini;

pub use gemini::GeminiClient;

use crate::error::Result;

/// Something that turns a prompt into raw text.
pub trait TextGenerator {
    /// Send `prompt` and return the model's raw text response.
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Short description for logs (e.g. the model name).
    fn describe(&self) -> String;
}
