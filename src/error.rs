//! Unified error hierarchy for pacezones
//!
//! Input that is merely "not yet valid" (blank trial time, unparsable LTHR)
//! is never an error here; those paths are silent no-ops in the units.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all pacezones operations
#[derive(Debug, Error)]
pub enum PaceZonesError {
    /// Estimation service call failed
    #[error("Estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the outbound estimation request.
///
/// All variants are reported to the user the same way; the split only
/// exists for diagnostics.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Connection refused, DNS failure, broken pipe...
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// Response body was not the expected JSON shape
    #[error("Could not decode response: {0}")]
    Decode(String),
}

/// Configuration loading and saving errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Result type alias for pacezones operations
pub type Result<T> = std::result::Result<T, PaceZonesError>;

impl PaceZonesError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PaceZonesError::Estimator(_) => ErrorSeverity::Error,
            PaceZonesError::Configuration(ConfigError::Read { .. }) => ErrorSeverity::Warning,
            PaceZonesError::Configuration(_) => ErrorSeverity::Error,
            PaceZonesError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PaceZonesError::Estimator(_) => SEND_FAILED_NOTICE.to_string(),
            PaceZonesError::Configuration(ConfigError::Parse { path, .. }) => {
                format!("Config file {} is not valid TOML", path.display())
            }
            _ => self.to_string(),
        }
    }
}

/// Notice shown once when a submission fails, whatever the cause.
pub const SEND_FAILED_NOTICE: &str = "Failed to send. Is the backend running?";

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Problem the user can fix, such as a missing config file
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = PaceZonesError::Configuration(ConfigError::Read {
            path: PathBuf::from("/missing/config.toml"),
            reason: "not found".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.user_message().contains("/missing/config.toml"));

        let err = PaceZonesError::from(EstimatorError::Decode("eof".to_string()));
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_parse_error_message_names_file() {
        let err = PaceZonesError::from(ConfigError::Parse {
            path: PathBuf::from("pacezones.toml"),
            reason: "expected `]`".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert_eq!(err.user_message(), "Config file pacezones.toml is not valid TOML");
    }

    #[test]
    fn test_estimator_errors_collapse_to_one_notice() {
        let transport = PaceZonesError::from(EstimatorError::Transport("refused".to_string()));
        let status = PaceZonesError::from(EstimatorError::Status {
            code: 502,
            body: "bad gateway".to_string(),
        });

        assert_eq!(transport.user_message(), SEND_FAILED_NOTICE);
        assert_eq!(status.user_message(), SEND_FAILED_NOTICE);
    }

    #[test]
    fn test_status_display() {
        let err = EstimatorError::Status {
            code: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
