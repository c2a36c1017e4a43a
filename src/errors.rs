/*!
 * Error types for the notes2ipe application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when opening or decoding a note archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// No member with the expected name or extension exists in the archive
    #[error("Archive has no member matching '{0}'")]
    MissingMember(String),

    /// The property list could not be decoded
    #[error("Failed to decode property list: {0}")]
    Plist(String),

    /// The property list decoded but does not have the expected shape
    #[error("Unexpected archive structure: {0}")]
    Schema(String),

    /// Reading the tar container failed
    #[error("Failed to read archive: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding a single stroke record
#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    /// The metadata string does not have the fixed number of fields
    #[error("Stroke metadata has {found} fields, expected {expected}")]
    FieldCount {
        /// Fields required by the record layout
        expected: usize,
        /// Fields actually present
        found: usize,
    },

    /// A token that must be numeric could not be parsed
    #[error("Invalid number '{token}' in {field}")]
    InvalidNumber {
        /// Which field the token belongs to
        field: &'static str,
        /// The offending token
        token: String,
    },

    /// The point list does not split into x/y pairs
    #[error("Point list has an odd number of values ({0})")]
    OddPointCount(usize),
}

/// Errors raised by the drawing pipeline
#[derive(Error, Debug, PartialEq)]
pub enum ConversionError {
    /// No stroke survived filtering, so there is no bounding box
    #[error("Drawing contains no strokes with at least two points")]
    EmptyStrokeSet,

    /// A stroke record was malformed
    #[error("Malformed stroke record: {0}")]
    Record(#[from] RecordError),
}

/// Errors from external programs the converter shells out to
#[derive(Error, Debug)]
pub enum ExternalToolError {
    /// The program could not be started at all
    #[error("Failed to run {tool}: {message}")]
    Spawn {
        /// Program name
        tool: String,
        /// Underlying OS error
        message: String,
    },

    /// The program ran and exited unsuccessfully
    #[error("{tool} exited with {}", describe_status(.status))]
    ExitStatus {
        /// Program name
        tool: String,
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Errors from delivering content to an output sink
#[derive(Error, Debug)]
pub enum SinkError {
    /// The system clipboard could not be opened or written
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Writing to a stream failed
    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from archive decoding
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Error from the drawing pipeline
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Error from an external program
    #[error("External tool error: {0}")]
    ExternalTool(#[from] ExternalToolError),

    /// Error from an output sink
    #[error("Output error: {0}")]
    Sink(#[from] SinkError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<RecordError> for AppError {
    fn from(error: RecordError) -> Self {
        Self::Conversion(ConversionError::Record(error))
    }
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
