//! Error types for docchat
//!
//! This module defines the crate-wide error type using `thiserror`.
//! Component-specific errors (`ExtractionError`, `GatewayError`,
//! `CommandError`) live next to the code that raises them; extraction
//! failures convert into `DocchatError` when they end a command.

use thiserror::Error;

/// Main error type for docchat operations
///
/// Only configuration, I/O and CLI failures are fatal. Extraction and model
/// failures are recovered inside the session and shown to the user instead.
#[derive(Error, Debug)]
pub enum DocchatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (HTTP client setup, unusable host, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Document extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] crate::extract::ExtractionError),

    /// Session errors (unknown chat title, nothing to save, ...)
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for docchat operations
///
/// Uses `anyhow::Error` so callers can attach context while propagating.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionError;

    #[test]
    fn test_config_error_display() {
        let error = DocchatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = DocchatError::Provider("bad host".to_string());
        assert_eq!(error.to_string(), "Provider error: bad host");
    }

    #[test]
    fn test_session_error_display() {
        let error = DocchatError::Session("unknown chat: Foo".to_string());
        assert_eq!(error.to_string(), "Session error: unknown chat: Foo");
    }

    #[test]
    fn test_extraction_error_conversion() {
        let error: DocchatError = ExtractionError::Pdf("no trailer".to_string()).into();
        assert!(matches!(error, DocchatError::Extraction(_)));
        assert!(error.to_string().contains("no trailer"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: DocchatError = io_error.into();
        assert!(matches!(error, DocchatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: DocchatError = json_error.into();
        assert!(matches!(error, DocchatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: DocchatError = yaml_error.into();
        assert!(matches!(error, DocchatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocchatError>();
    }
}
