//! Exit code constants for the infraagent CLI.
//!
//! - 0: Success
//! - 1: User error (missing flag, bad config)
//! - 2: Credentials missing (no API key)
//! - 3: AI service failure (network, provider error, empty response)
//! - 4: Filesystem write failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: missing or invalid flags, invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The API key is not configured.
pub const CREDENTIALS_MISSING: i32 = 2;

/// The AI service could not be reached, rejected the request, or returned nothing usable.
pub const AI_FAILURE: i32 = 3;

/// Generated files could not be written to the output directory.
pub const WRITE_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            CREDENTIALS_MISSING,
            AI_FAILURE,
            WRITE_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn only_success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert!(USER_ERROR > 0);
        assert!(CREDENTIALS_MISSING > 0);
        assert!(AI_FAILURE > 0);
        assert!(WRITE_FAILURE > 0);
    }
}
