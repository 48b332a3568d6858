/*!
 * Error types for the tbxmin converter.
 *
 * Only usage, I/O and malformed-markup problems are errors. Soft data
 * issues inside a well-formed termbase never surface here; they are
 * recovered locally and reported through the diagnostics channel instead.
 */

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors that abort a conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The caller did not supply what a conversion needs
    #[error("Usage error: {0}")]
    Usage(String),

    /// The input could not be opened or read
    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        /// Path of the input, when it came from the filesystem
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed markup
    #[error("Malformed input at byte {position}: {message}")]
    Malformed {
        /// Byte offset the reader had reached
        position: u64,
        /// What went wrong
        message: String,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" reading {:?}", path),
        None => String::new(),
    }
}

impl ConvertError {
    /// Classify a reader error, keeping I/O failures apart from syntax errors
    pub fn from_xml(error: quick_xml::Error, position: u64) -> Self {
        match error {
            quick_xml::Error::Io(io) => Self::Io {
                path: None,
                source: std::io::Error::new(io.kind(), io.to_string()),
            },
            other => Self::Malformed {
                position,
                message: other.to_string(),
            },
        }
    }

    /// Attach the input path to an I/O error that lacks one
    pub fn with_path(self, input_path: Option<&Path>) -> Self {
        match self {
            Self::Io { path: None, source } => Self::Io {
                path: input_path.map(Path::to_path_buf),
                source,
            },
            other => other,
        }
    }

    /// True for errors caused by the caller rather than the input
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration file
    #[error("Config error: {0}")]
    Config(String),

    /// Error from the conversion itself
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Error while rendering or emitting the converted document
    #[error("Output error: {0}")]
    Output(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Output(error.to_string())
    }
}
