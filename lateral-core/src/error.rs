//! Core error types for Lateral

use thiserror::Error;

/// Main error type for Lateral operations
#[derive(Error, Debug)]
pub enum LateralError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Lateral operations
pub type LateralResult<T> = Result<T, LateralError>;

impl From<toml::de::Error> for LateralError {
    fn from(err: toml::de::Error) -> Self {
        LateralError::Configuration(err.to_string())
    }
}

impl From<anyhow::Error> for LateralError {
    fn from(err: anyhow::Error) -> Self {
        LateralError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let io_error = LateralError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(format!("{}", io_error).contains("IO error"));

        let config_error = LateralError::Configuration("missing field".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: missing field"
        );

        let tool_error = LateralError::Tool("binary exited with 2".to_string());
        assert_eq!(format!("{}", tool_error), "Tool error: binary exited with 2");

        let not_found = LateralError::NotFound("species tree".to_string());
        assert_eq!(format!("{}", not_found), "Not found: species tree");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: LateralError = io_err.into();

        match err {
            LateralError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: LateralError = anyhow_err.into();

        match err {
            LateralError::Other(msg) => assert_eq!(msg, "custom error message"),
            _ => panic!("Expected Other error variant"),
        }
    }

    #[test]
    fn test_error_result_type() {
        fn returns_err() -> LateralResult<()> {
            Err(LateralError::Submission("qsub not found".to_string()))
        }

        match returns_err().unwrap_err() {
            LateralError::Submission(msg) => assert!(msg.contains("qsub")),
            _ => panic!("Expected Submission error"),
        }
    }
}
