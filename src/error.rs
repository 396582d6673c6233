use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the award-photos library.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Malformed input such as a file name without an extension.
    #[error("Validation failed: {message}")]
    Validation {
        /// Detailed error message
        message: String,
    },

    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Output directory left over from a previous run.
    #[error("Output directory '{path}' already exists. Remove it or pick another suffix.")]
    OutputExists {
        /// Directory that already exists
        path: PathBuf,
    },

    /// Image could not be decoded or encoded.
    #[error("Image error for '{path}': {message}")]
    Image {
        /// Path of the image
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Operation attempted on an image handle that was never opened.
    #[error("Illegal state: {message}")]
    IllegalState {
        /// Detailed error message
        message: String,
    },

    /// External editor could not be launched.
    #[error("Failed to launch external editor '{program}': {message}")]
    ExternalTool {
        /// Program that was launched
        program: String,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// Invalid metadata skip pattern.
    #[error("Invalid skip pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The invalid pattern
        pattern: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Interactive prompt failed (terminal closed, not a tty).
    #[error("Prompt failed: {message}")]
    Prompt {
        /// Error message
        message: String,
    },

    /// JSON serialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an IO error with path context.
    ///
    /// `AlreadyExists` is not special-cased here; setup maps it to
    /// [`Error::OutputExists`] itself.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an output-exists error.
    #[must_use]
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Creates an image decode/encode error.
    #[must_use]
    pub fn image(path: impl Into<PathBuf>, source: impl std::fmt::Display) -> Self {
        Self::Image {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an illegal state error.
    #[must_use]
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Creates an external tool error.
    #[must_use]
    pub fn external_tool(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::ExternalTool {
            program: program.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates a prompt error.
    #[must_use]
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true for every IO-class error, including image codec
    /// failures and a pre-existing output directory.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::OutputExists { .. } | Self::Image { .. } | Self::Prompt { .. }
        )
    }

    /// Returns true if this is an illegal state error.
    #[must_use]
    pub const fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState { .. })
    }

    /// Returns true if the external editor failed to launch.
    #[must_use]
    pub const fn is_external_tool(&self) -> bool {
        matches!(self, Self::ExternalTool { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidPattern { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Self::Prompt {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::validation("missing extension");
        assert!(err.is_validation());
        assert!(err.to_string().contains("missing extension"));
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("/tmp/test.jpg", io_err);
        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/test.jpg"));
    }

    #[test]
    fn test_output_exists_is_io() {
        let err = Error::output_exists("/photos/contest_edited");
        assert!(err.is_io());
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_external_tool_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = Error::external_tool("gimp", io_err);
        assert!(err.is_external_tool());
        assert!(!err.is_io());
        assert!(err.to_string().contains("gimp"));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::illegal_state("image not opened");
        let cloned = err.clone();
        assert!(cloned.is_illegal_state());
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_serialization_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().contains("Serialization error"));
    }
}
