// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Script text does not parse into a well-formed script
    #[error("Malformed script: {0}")]
    MalformedScript(String),

    /// Script is well-formed but breaks the timing rules
    #[error("Invalid script: {0}")]
    InvalidScript(String),

    /// Generation backend call failed
    #[error("Backend error: {0}")]
    Backend(String),

    /// Frames could not be written to a video file
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration values are unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed
    #[error("File system error: {0}")]
    Fs(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
}
