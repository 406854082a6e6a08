//! Test builders — temporary log directories, descriptor lists and runs.
//!
//! These helpers are designed for readability in tests, not for production
//! use. They panic on I/O failure rather than returning `Result`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use logfan::{FollowConfig, LogDescriptor, LogFormat, Supervisor, TrackingResult, TrackingRun};
use tempfile::TempDir;

/// Upper bound on any single wait in a harness.
pub const WAIT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// LogDir
// ---------------------------------------------------------------------------

/// A temporary directory of log files that is removed on drop.
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Create `name` containing `lines`, each newline terminated.
    pub fn file(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, "").expect("create log file");
        append(&path, lines);
        path
    }

    pub fn descriptor(&self, name: &str, format: LogFormat) -> LogDescriptor {
        LogDescriptor::new(self.path(name), format).expect("valid descriptor")
    }

    /// Write a descriptor list JSON document and return its path.
    pub fn file_list(&self, descriptors: &[LogDescriptor]) -> PathBuf {
        let files: Vec<_> = descriptors
            .iter()
            .map(|d| {
                serde_json::json!({
                    "full_path": d.full_path(),
                    "format": d.format().as_str(),
                })
            })
            .collect();
        let path = self.path("file_list.json");
        std::fs::write(&path, serde_json::json!({ "files": files }).to_string())
            .expect("write file list");
        path
    }
}

/// Append newline-terminated `lines` to an existing file.
pub fn append(path: &Path, lines: &[&str]) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open log file for append");
    for line in lines {
        writeln!(file, "{line}").expect("append line");
    }
    file.flush().expect("flush log file");
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

/// A supervisor that notices appended bytes within a few milliseconds.
pub fn fast_supervisor() -> Supervisor {
    Supervisor::new(FollowConfig {
        poll_interval: Duration::from_millis(10),
        native_watch: true,
    })
}

/// Receive the next result, panicking if none arrives within [`WAIT`].
pub async fn next_result(run: &mut TrackingRun) -> TrackingResult {
    tokio::time::timeout(WAIT, run.recv())
        .await
        .expect("timed out waiting for a result")
        .expect("stream closed while a result was expected")
}

/// Receive exactly `n` results.
pub async fn take_results(run: &mut TrackingRun, n: usize) -> Vec<TrackingResult> {
    let mut results = Vec::with_capacity(n);
    for _ in 0..n {
        results.push(next_result(run).await);
    }
    results
}

/// Drain whatever is left and return it once the stream closes.
pub async fn drain_until_closed(run: &mut TrackingRun) -> Vec<TrackingResult> {
    let mut results = Vec::new();
    loop {
        match tokio::time::timeout(WAIT, run.recv()).await {
            Ok(Some(result)) => results.push(result),
            Ok(None) => return results,
            Err(_) => panic!("stream did not close within {WAIT:?}"),
        }
    }
}
