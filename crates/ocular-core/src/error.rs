//! Error types for ocular event detection
//!
//! Provides a unified error type for all ocular-kit crates.

use thiserror::Error;

/// Core error type for ocular event detection
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required input for the selected detection method was not supplied
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a missing method argument
    pub fn missing(what: &str, method: &str) -> Self {
        Self::MissingInput(format!("{what} is required for {method} detection"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a threshold that must be strictly positive
    pub fn non_positive(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be positive, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("scale must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: scale must be positive");

        let err = Error::InvalidInput("channel lengths differ".to_string());
        assert_eq!(err.to_string(), "Invalid input: channel lengths differ");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::missing("screen size", "gazepoint");
        assert_eq!(
            err.to_string(),
            "Missing input: screen size is required for gazepoint detection"
        );

        let err = Error::size_mismatch(100, 50, "horizontal channel");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in horizontal channel: expected 100, got 50"
        );

        let err = Error::non_positive("sampling rate", 0.0);
        assert_eq!(err.to_string(), "Invalid parameter: sampling rate must be positive, got 0");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("Config error:"));
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => assert!(err.to_string().contains("file not found")),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        assert!(matches!(err, Error::Other(_)));
        assert!(err.to_string().contains("custom error message"));
    }
}
