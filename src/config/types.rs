//! Configuration defaults and environment variable names.

use std::path::PathBuf;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "infraagent.yaml";

/// Environment variables read on top of the config file.
pub mod env {
    pub const API_KEY: &str = "GEMINI_API_KEY";
    pub const MODEL: &str = "GEMINI_MODEL";
    pub const MAX_TOKENS: &str = "GEMINI_MAX_TOKENS";
    pub const TEMPERATURE: &str = "GEMINI_TEMPERATURE";
    pub const BASE_URL: &str = "GEMINI_BASE_URL";
    pub const TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";
    pub const OUTPUT_DIR: &str = "OUTPUT_DIR";
}

pub fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub fn default_max_output_tokens() -> u32 {
    8192
}

pub fn default_temperature() -> f32 {
    0.2
}

pub fn default_timeout_secs() -> u64 {
    120
}

pub fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
