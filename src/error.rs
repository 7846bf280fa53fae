//! Error types for pagemark library.

use std::io;
use thiserror::Error;

/// Result type alias for pagemark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed structured text. Aborts the whole document.
    #[error("Parse error at line {line} (byte {offset}): {message}")]
    Parse {
        /// 1-based line number of the defect
        line: usize,
        /// Byte offset into the input
        offset: usize,
        /// What went wrong
        message: String,
    },

    /// The input is not valid UTF-8.
    #[error("Invalid UTF-8 at byte {offset}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte
        offset: usize,
    },

    /// A YAML source failed validation.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Failure reported by a page writer.
    #[error("Page writer error: {0}")]
    Writer(String),

    /// No converter accepts this extension.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// A configuration value could not be interpreted.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Error serializing rendered output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create a parse error at the given location.
    pub fn parse(line: usize, offset: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            offset,
            message: message.into(),
        }
    }

    /// Check if this error was raised while parsing the source document.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::InvalidUtf8 { .. } | Error::Yaml(_)
        )
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err.to_string())
    }
}
