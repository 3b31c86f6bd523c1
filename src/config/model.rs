//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Runtime configuration for infraagent.
///
/// Loaded from `infraagent.yaml` (or `--config`), then overlaid with
/// environment variables. Unknown YAML fields are ignored. The API key is
/// only ever taken from the environment.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini model name (e.g. `gemini-2.5-flash`).
    pub model: String,

    /// Upper bound on generated tokens per request.
    pub max_output_tokens: u32,

    /// Sampling temperature, `0.0..=2.0`.
    pub temperature: f32,

    /// HTTP request timeout.
    pub timeout_secs: u64,

    /// Base URL of the model endpoints; the model name and `:generateContent` are appended.
    pub base_url: String,

    /// Default output directory when `--output` is not given.
    pub output_dir: PathBuf,

    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
            output_dir: default_output_dir(),
            api_key: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .field("output_dir", &self.output_dir)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}
