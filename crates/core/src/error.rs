//! Structured error handling for the build helper
//!
//! Every failure in the flow is terminal: errors carry a code, an optional
//! context line, and an optional recovery suggestion, and the binary maps
//! them to a process exit code. Nothing here retries.

use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // General errors (1xxx)
    Unknown = 1000,
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // Manifest errors (3xxx)
    ManifestError = 3000,
    ManifestNotFound = 3001,
    ManifestParseError = 3002,
    ManifestMissingField = 3003,

    // Interactive input errors (4xxx)
    InputError = 4000,
    InvalidInput = 4001,
    EmptyInput = 4002,
    Cancelled = 4003,

    // Process errors (5xxx)
    ProcessError = 5000,
    CommandNotFound = 5001,
    CommandFailed = 5002,

    // Platform toolchain errors (6xxx)
    PlatformError = 6000,
    GradleError = 6001,
    XcodeError = 6002,
    PodError = 6003,
    ExpoError = 6004,

    // Configuration errors (7xxx)
    ConfigError = 7000,
    ConfigParseError = 7001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Manifest",
            4 => "Input",
            5 => "Process",
            6 => "Platform",
            7 => "Configuration",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with code, context, and suggestion
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context (captured command output, file path, ...)
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// True if this error represents a user-initiated abort
    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::Cancelled
    }

    // Convenience constructors

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn manifest(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ManifestError, message)
    }

    pub fn manifest_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ManifestNotFound,
            format!("App manifest not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Run from the project root, or point --manifest at your app.json")
    }

    pub fn manifest_missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::ManifestMissingField,
            format!("App manifest is missing required field: {}", field),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn empty_input(what: &str) -> Self {
        Self::new(ErrorCode::EmptyInput, format!("A value for {} is required", what))
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorCode::Cancelled, "Operation cancelled by user")
    }

    pub fn process(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessError, message)
    }

    pub fn command_not_found(cmd: &str) -> Self {
        Self::new(
            ErrorCode::CommandNotFound,
            format!("Command not found: {}", cmd),
        )
        .with_suggestion(format!("Install {} and ensure it's in your PATH", cmd))
    }

    pub fn command_failed(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::CommandFailed,
            format!("Command failed: {}", command.into()),
        )
        .with_context(output)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    /// User abort is not a failure
    pub const CANCELLED: i32 = 0;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(
            ErrorCode::ManifestParseError,
            format!("JSON parse error: {}", err),
        )
        .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("TOML parse error: {}", err),
        )
        .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ManifestParseError.to_string(), "E3002");
        assert_eq!(ErrorCode::CommandFailed.to_string(), "E5002");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ManifestError.category(), "Manifest");
        assert_eq!(ErrorCode::InvalidInput.category(), "Input");
        assert_eq!(ErrorCode::GradleError.category(), "Platform");
    }

    #[test]
    fn test_cancelled_is_distinct() {
        let err = Error::cancelled();
        assert!(err.is_cancelled());
        assert!(!Error::invalid_input("nope").is_cancelled());
    }

    #[test]
    fn test_command_failed_carries_output() {
        let err = Error::command_failed("./gradlew clean", "FAILURE: Build failed");
        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert!(err.context.as_deref().unwrap().contains("Build failed"));
    }

    #[test]
    fn test_json_error_maps_to_manifest_parse() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::ManifestParseError);
    }

    #[test]
    fn test_exit_codes_contract() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CANCELLED, 0);
        assert_eq!(exit_codes::FAILURE, 1);
    }
}
