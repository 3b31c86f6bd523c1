//! Config loading, environment overlay, and validation.

use super::model::Config;
use super::types::{DEFAULT_CONFIG_FILE, env};
use crate::error::{InfraError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            InfraError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| InfraError::Config(format!("failed to parse config YAML: {}", e)))
    }

    /// Locate and load the config file.
    ///
    /// An explicit path must exist. Otherwise `infraagent.yaml` in `dir` is
    /// used when present, and the defaults when not.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("loading config from {}", path.display());
            return Self::load(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            log::debug!("loading config from {}", candidate.display());
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay values from the environment.
    ///
    /// `lookup` returns the value of a variable; empty values count as unset.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(env::API_KEY) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(model) = get(env::MODEL) {
            self.model = model;
        }
        if let Some(raw) = get(env::MAX_TOKENS) {
            self.max_output_tokens = parse_env(env::MAX_TOKENS, &raw)?;
        }
        if let Some(raw) = get(env::TEMPERATURE) {
            self.temperature = parse_env(env::TEMPERATURE, &raw)?;
        }
        if let Some(url) = get(env::BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = get(env::TIMEOUT_SECS) {
            self.timeout_secs = parse_env(env::TIMEOUT_SECS, &raw)?;
        }
        if let Some(dir) = get(env::OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }

        Ok(self)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `model` and `base_url` must be non-empty
    /// - `max_output_tokens` and `timeout_secs` must be positive
    /// - `temperature` must lie in `0.0..=2.0`
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(InfraError::Config("model must not be empty".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(InfraError::Config("base_url must not be empty".to_string()));
        }
        if self.max_output_tokens == 0 {
            return Err(InfraError::Config(
                "max_output_tokens must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(InfraError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(InfraError::Config(format!(
                "temperature must be between 0.0 and 2.0 (found {})",
                self.temperature
            )));
        }
        Ok(())
    }

    /// The configured API key, or [`InfraError::MissingApiKey`].
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(InfraError::MissingApiKey)
    }
}

fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| InfraError::Config(format!("{} has invalid value '{}': {}", name, raw, e)))
}
