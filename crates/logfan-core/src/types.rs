//! Core types for logfan-core.
//!
//! This module defines the data that flows through the tracking pipeline: the
//! validated [`LogDescriptor`] that configures one tracked file, the
//! [`LogRecord`] produced for every parsed line, and the [`TrackingResult`]
//! carried on every channel.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, LineError};

/// The outcome of reading one raw line: a parsed record or a descriptive
/// parse error. A malformed line travels as data and never stops a tracker.
pub type TrackingResult = Result<LogRecord, LineError>;

// ---------------------------------------------------------------------------
// LogFormat
// ---------------------------------------------------------------------------

/// Closed set of line formats a tracked file may be written in.
///
/// Each variant owns exactly one line parser; see
/// [`LineParser::for_format`](crate::parser::LineParser::for_format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// `Feb 1, 2018 at 3:04:05pm (UTC) | message`
    FirstFormat,
    /// `2018-02-01T15:04:05Z | message` (year, day, month)
    SecondFormat,
}

impl LogFormat {
    /// Every registered format, in declaration order.
    pub const ALL: [LogFormat; 2] = [LogFormat::FirstFormat, LogFormat::SecondFormat];

    /// The name used in descriptor lists and persisted documents.
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::FirstFormat => "first_format",
            LogFormat::SecondFormat => "second_format",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| DescriptorError::UnknownFormat(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// LogDescriptor
// ---------------------------------------------------------------------------

/// A validated pairing of a file path with the format its lines are written in.
///
/// Descriptors can only be built through [`LogDescriptor::new`], its
/// `PATH=FORMAT` [`FromStr`] impl, or deserialisation, all of which reject an
/// empty path and an unregistered format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct LogDescriptor {
    full_path: PathBuf,
    format: LogFormat,
}

/// Unvalidated descriptor as it appears in a file list.
#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    full_path: String,
    #[serde(default)]
    format: String,
}

impl TryFrom<RawDescriptor> for LogDescriptor {
    type Error = DescriptorError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        if raw.full_path.is_empty() {
            return Err(DescriptorError::EmptyPath);
        }
        LogDescriptor::new(raw.full_path, raw.format.parse()?)
    }
}

impl LogDescriptor {
    pub fn new(full_path: impl Into<PathBuf>, format: LogFormat) -> Result<Self, DescriptorError> {
        let full_path = full_path.into();
        if full_path.as_os_str().is_empty() {
            return Err(DescriptorError::EmptyPath);
        }
        Ok(Self { full_path, format })
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }
}

impl fmt::Display for LogDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_path.display(), self.format)
    }
}

/// Parses `PATH=FORMAT`. The split happens on the last `=` so paths that
/// contain `=` still work.
impl FromStr for LogDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, format) = s
            .rsplit_once('=')
            .ok_or_else(|| DescriptorError::MissingFormat(s.to_string()))?;
        LogDescriptor::new(path, format.parse()?)
    }
}

// ---------------------------------------------------------------------------
// LogRecord
// ---------------------------------------------------------------------------

/// A successfully parsed log line.
///
/// Serialised with the field names of the persisted document so a sink can
/// write it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Time recorded on the line itself.
    #[serde(rename = "log_time")]
    pub timestamp: DateTime<Utc>,
    /// Everything after the field delimiter, verbatim.
    #[serde(rename = "log_msg")]
    pub message: String,
    /// The file the line was read from.
    #[serde(rename = "file_name")]
    pub source_path: PathBuf,
    /// The format whose parser produced this record.
    #[serde(rename = "log_format")]
    pub format: LogFormat,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
