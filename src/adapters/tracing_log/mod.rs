// Tracing log adapter - Subscriber setup for structured logging

use std::io;

use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// Single-line text output
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    /// Parse log format from string
    pub fn parse(format: &str) -> Result<Self, DomainError> {
        match format.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                format
            ))),
        }
    }
}

/// Build the event filter; `RUST_LOG` wins over the requested level
pub fn build_filter(level: &str) -> Result<EnvFilter, DomainError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| DomainError::BadArgs(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global subscriber, writing to stderr
///
/// A second call is a no-op, so tests and embedding callers can call it freely.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<(), DomainError> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let _ = match format {
        LogFormat::Pretty => builder.with_target(false).try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!(LogFormat::parse("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::parse("pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::parse("xml").is_err());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        assert!(init_tracing("warn", LogFormat::Compact).is_ok());
        assert!(init_tracing("debug", LogFormat::Json).is_ok());
    }
}
