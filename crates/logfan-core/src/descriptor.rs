//! Descriptor lists — the JSON document naming every file to track.
//!
//! ```json
//! {
//!   "files": [
//!     { "full_path": "/var/log/app/first.log",  "format": "first_format" },
//!     { "full_path": "/var/log/app/second.log", "format": "second_format" }
//!   ]
//! }
//! ```
//!
//! Every entry is validated while it is deserialised, so a list either loads
//! completely or fails with an error naming the bad field.

use std::path::Path;

use serde::Deserialize;

use crate::error::FileListError;
use crate::types::LogDescriptor;

#[derive(Deserialize)]
struct FileList {
    files: Vec<LogDescriptor>,
}

/// Read and validate the descriptor list at `path`, preserving entry order.
pub fn load_file_list(path: &Path) -> Result<Vec<LogDescriptor>, FileListError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FileListError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_list(&contents)
}

/// Validate a descriptor list held in memory.
pub fn parse_file_list(contents: &str) -> Result<Vec<LogDescriptor>, FileListError> {
    let list: FileList = serde_json::from_str(contents)?;
    Ok(list.files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
