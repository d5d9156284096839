//! Error types for DDL generation.

use thiserror::Error;

/// Main error type for parsing and DDL generation.
#[derive(Error, Debug)]
pub enum DdlError {
    /// The SQL text was empty or whitespace-only (raised by the caller
    /// before the parser runs).
    #[error("SQL input is empty")]
    EmptyInput,

    /// None of the extraction strategies recognized the input.
    #[error("input is not a recognizable SELECT query or field list")]
    UnparsableSql,

    /// Extraction succeeded but produced zero field descriptors.
    #[error("no fields could be extracted from the input")]
    NoFieldsExtracted,

    /// None of the requested database types are recognized.
    #[error("none of the requested database types are supported")]
    NoValidDialects,

    /// Rule-file error (invalid YAML/JSON, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DdlError {
    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        DdlError::Config(message.into())
    }

    /// Whether the error is caused by bad caller input (a 4xx-equivalent)
    /// rather than an internal failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DdlError::EmptyInput
                | DdlError::UnparsableSql
                | DdlError::NoFieldsExtracted
                | DdlError::NoValidDialects
                | DdlError::Config(_)
        )
    }

    /// Process exit code for the CLI: 2 for user errors, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_user_error() {
            2
        } else {
            1
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for parsing and DDL generation.
pub type Result<T> = std::result::Result<T, DdlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_exit_with_2() {
        assert_eq!(DdlError::EmptyInput.exit_code(), 2);
        assert_eq!(DdlError::UnparsableSql.exit_code(), 2);
        assert_eq!(DdlError::NoFieldsExtracted.exit_code(), 2);
        assert_eq!(DdlError::NoValidDialects.exit_code(), 2);
        assert_eq!(DdlError::config("bad rule").exit_code(), 2);
    }

    #[test]
    fn test_internal_errors_exit_with_1() {
        let io = DdlError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_code(), 1);
        assert!(!io.is_user_error());
    }

    #[test]
    fn test_unparsable_message_is_user_facing() {
        assert_eq!(
            DdlError::UnparsableSql.to_string(),
            "input is not a recognizable SELECT query or field list"
        );
    }

    #[test]
    fn test_format_detailed_includes_chain() {
        let io = DdlError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let detailed = io.format_detailed();
        assert!(detailed.starts_with("Error: IO error"));
        assert!(detailed.contains("Caused by"));
    }
}
