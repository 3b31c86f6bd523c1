//! Error types for the infraagent CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Validation findings are not errors; they travel in `ValidationResult`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for infraagent operations.
#[derive(Error, Debug)]
pub enum InfraError {
    /// A flag required by the selected generator was not supplied.
    #[error("missing required flag {0}")]
    MissingFlag(String),

    /// No API key is configured.
    #[error(
        "GEMINI_API_KEY is not set. Export it or add it to a .env file in the current directory."
    )]
    MissingApiKey,

    /// The HTTP request to the AI service failed before a response arrived.
    #[error("request to the AI service failed: {0}")]
    NetworkFailure(String),

    /// The AI service answered with an error status.
    #[error("AI service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The AI service answered but produced no usable text.
    #[error("AI service returned an empty response: {0}")]
    AiResponseEmpty(String),

    /// Writing an output file failed.
    #[error("failed to write output: {0}")]
    FilesystemWriteFailure(String),

    /// Configuration file or environment values are invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A prompt template could not be rendered.
    #[error("prompt template error: {0}")]
    Template(String),
}

impl InfraError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            InfraError::MissingFlag(_) | InfraError::Config(_) | InfraError::Template(_) => {
                exit_codes::USER_ERROR
            }
            InfraError::MissingApiKey => exit_codes::CREDENTIALS_MISSING,
            InfraError::NetworkFailure(_)
            | InfraError::Api { .. }
            | InfraError::AiResponseEmpty(_) => exit_codes::AI_FAILURE,
            InfraError::FilesystemWriteFailure(_) => exit_codes::WRITE_FAILURE,
        }
    }
}

/// Result type alias for infraagent operations.
pub type Result<T> = std::result::Result<T, InfraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flag_is_a_user_error() {
        let err = InfraError::MissingFlag("--app".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(err.to_string(), "missing required flag --app");
    }

    #[test]
    fn missing_api_key_has_its_own_exit_code() {
        let err = InfraError::MissingApiKey;
        assert_eq!(err.exit_code(), exit_codes::CREDENTIALS_MISSING);
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn ai_errors_share_exit_code() {
        let errors = [
            InfraError::NetworkFailure("connection refused".to_string()),
            InfraError::Api {
                status: 403,
                message: "API key not valid".to_string(),
            },
            InfraError::AiResponseEmpty("no candidates".to_string()),
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), exit_codes::AI_FAILURE, "{}", err);
        }
    }

    #[test]
    fn api_error_surfaces_provider_message() {
        let err = InfraError::Api {
            status: 400,
            message: "API key not valid. Please pass a valid API key.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "AI service returned HTTP 400: API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn write_failure_has_correct_exit_code() {
        let err = InfraError::FilesystemWriteFailure("permission denied".to_string());
        assert_eq!(err.exit_code(), exit_codes::WRITE_FAILURE);
    }

    #[test]
    fn config_and_template_errors_are_user_errors() {
        assert_eq!(
            InfraError::Config("timeout_secs must be greater than 0".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            InfraError::Template("undefined variable 'x'".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
    }
}
