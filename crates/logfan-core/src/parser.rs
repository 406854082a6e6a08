//! Line parsers — turn one raw line into a [`LogRecord`] or a [`LineError`].
//!
//! Every registered [`LogFormat`] maps to exactly one static [`LineParser`],
//! which pairs the field delimiter with the format's timestamp layout. Adding
//! a format means adding a variant and a new registry entry; existing entries
//! never change.
//!
//! Parsing is pure. Trackers call [`parse`] concurrently without sharing any
//! state.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{LineError, TimestampError};
use crate::types::{LogFormat, LogRecord, TrackingResult};

/// Separates the timestamp field from the message field.
pub const FIELD_DELIMITER: &str = " | ";

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

static FIRST_FORMAT: LineParser = LineParser {
    format: LogFormat::FirstFormat,
    delimiter: FIELD_DELIMITER,
    // Feb 1, 2018 at 3:04:05pm (UTC)
    layout: TimestampLayout::ZoneSuffixed("%b %d, %Y at %I:%M:%S%P"),
};

static SECOND_FORMAT: LineParser = LineParser {
    format: LogFormat::SecondFormat,
    delimiter: FIELD_DELIMITER,
    // 2018-02-01T15:04:05Z, day before month
    layout: TimestampLayout::Utc("%Y-%d-%mT%H:%M:%SZ"),
};

/// Parse one raw line read from `source_path` with the parser registered for
/// `format`.
pub fn parse(raw_line: &str, source_path: &Path, format: LogFormat) -> TrackingResult {
    LineParser::for_format(format).parse(raw_line, source_path)
}

// ---------------------------------------------------------------------------
// LineParser
// ---------------------------------------------------------------------------

/// How a format writes its timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLayout {
    /// A 12-hour chrono pattern ending in a lowercase am/pm marker, followed
    /// by a parenthesised zone abbreviation, e.g. `(UTC)`. The abbreviation
    /// is validated but carries a zero offset.
    ZoneSuffixed(&'static str),
    /// A chrono pattern describing a UTC timestamp in full.
    Utc(&'static str),
}

impl TimestampLayout {
    pub fn pattern(self) -> &'static str {
        match self {
            TimestampLayout::ZoneSuffixed(pattern) | TimestampLayout::Utc(pattern) => pattern,
        }
    }

    pub fn parse(self, field: &str) -> Result<DateTime<Utc>, TimestampError> {
        let pattern = self.pattern();
        let local = match self {
            TimestampLayout::Utc(_) => field,
            TimestampLayout::ZoneSuffixed(_) => {
                let local = strip_zone(field)?;
                // chrono matches %P case-insensitively.
                if !(local.ends_with("am") || local.ends_with("pm")) {
                    return Err(TimestampError::Meridiem(field.to_string()));
                }
                local
            }
        };
        NaiveDateTime::parse_from_str(local, pattern)
            .map(|naive| naive.and_utc())
            .map_err(|source| TimestampError::Layout {
                layout: pattern,
                source,
            })
    }
}

/// Split `... (ABBR)` and return the part before the zone.
fn strip_zone(field: &str) -> Result<&str, TimestampError> {
    let (local, zone) = field
        .strip_suffix(')')
        .and_then(|rest| rest.rsplit_once(" ("))
        .ok_or_else(|| TimestampError::Zone(field.to_string()))?;

    let valid = (3..=5).contains(&zone.len()) && zone.bytes().all(|b| b.is_ascii_uppercase());
    if !valid {
        return Err(TimestampError::Zone(field.to_string()));
    }
    Ok(local)
}

/// The parser registered for one [`LogFormat`].
#[derive(Debug)]
pub struct LineParser {
    format: LogFormat,
    delimiter: &'static str,
    layout: TimestampLayout,
}

impl LineParser {
    /// Look up the registered parser. The match is exhaustive, so every
    /// format has exactly one parser.
    pub fn for_format(format: LogFormat) -> &'static LineParser {
        match format {
            LogFormat::FirstFormat => &FIRST_FORMAT,
            LogFormat::SecondFormat => &SECOND_FORMAT,
        }
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn delimiter(&self) -> &'static str {
        self.delimiter
    }

    pub fn layout(&self) -> TimestampLayout {
        self.layout
    }

    pub fn parse(&self, raw_line: &str, source_path: &Path) -> TrackingResult {
        let mut fields = raw_line.split(self.delimiter);
        let (Some(timestamp), Some(message), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(LineError::FieldCount {
                format: self.format,
                line: raw_line.to_string(),
                source_path: source_path.to_path_buf(),
                fields: raw_line.split(self.delimiter).count(),
            });
        };

        let timestamp = self
            .layout
            .parse(timestamp)
            .map_err(|source| LineError::Timestamp {
                format: self.format,
                line: raw_line.to_string(),
                source_path: source_path.to_path_buf(),
                source,
            })?;

        Ok(LogRecord {
            timestamp,
            message: message.to_string(),
            source_path: source_path.to_path_buf(),
            format: self.format,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
