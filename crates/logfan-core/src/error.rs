//! Error types for descriptor validation and line parsing.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::LogFormat;

/// A descriptor failed validation. Raised before any tracking starts.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("path to file is empty")]
    EmptyPath,
    #[error("invalid log format: {0}")]
    UnknownFormat(String),
    #[error("expected PATH=FORMAT, got {0:?}")]
    MissingFormat(String),
}

/// A descriptor list could not be loaded.
#[derive(Debug, Error)]
pub enum FileListError {
    #[error("error while reading file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error while parsing file list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A raw line that could not be turned into a [`LogRecord`](crate::LogRecord).
///
/// Both variants name the format, the offending line and the file it came
/// from; they travel through the pipeline as the `Err` side of a
/// [`TrackingResult`](crate::TrackingResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line did not split into exactly two fields.
    #[error("{format}: unable to parse text string: {line}")]
    FieldCount {
        format: LogFormat,
        line: String,
        source_path: PathBuf,
        fields: usize,
    },
    /// The timestamp field did not match the format's layout.
    #[error("{format}: unable to parse string to time: {line}")]
    Timestamp {
        format: LogFormat,
        line: String,
        source_path: PathBuf,
        #[source]
        source: TimestampError,
    },
}

impl LineError {
    pub fn format(&self) -> LogFormat {
        match self {
            LineError::FieldCount { format, .. } | LineError::Timestamp { format, .. } => *format,
        }
    }

    /// The raw line exactly as it was read.
    pub fn line(&self) -> &str {
        match self {
            LineError::FieldCount { line, .. } | LineError::Timestamp { line, .. } => line,
        }
    }

    pub fn source_path(&self) -> &Path {
        match self {
            LineError::FieldCount { source_path, .. }
            | LineError::Timestamp { source_path, .. } => source_path,
        }
    }
}

/// Why a timestamp field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("does not match layout {layout:?}: {source}")]
    Layout {
        layout: &'static str,
        #[source]
        source: chrono::ParseError,
    },
    #[error("missing or malformed zone abbreviation in {0:?}")]
    Zone(String),
    #[error("expected a lowercase am/pm marker in {0:?}")]
    Meridiem(String),
}
