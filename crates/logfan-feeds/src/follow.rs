//! Followers — read a file from its first byte, then keep reading as it grows.
//!
//! A [`Follower`] behaves like `tail -f -n +1`: it yields every complete line
//! already in the file and then waits for more. Waiting uses native file
//! notifications (inotify/kqueue/FSEvents via `notify`) when they can be set
//! up, with a poll interval as the upper bound on every wait, so a missed or
//! unsupported notification only costs latency.
//!
//! A trailing line without its `\n` is held back until the newline arrives.
//! Rotation and truncation are not handled.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use logfan_core::config::TrackingConfig;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// LineSource
// ---------------------------------------------------------------------------

/// A stream of raw lines a tracker can consume.
///
/// Implemented by [`Follower`] for files on disk and by
/// `mpsc::Receiver<String>` for in-memory sources.
pub trait LineSource: Send + 'static {
    /// Wait for the next complete line, without its terminator.
    ///
    /// `None` means the source is exhausted; an `Err` is terminal too.
    fn next_line(&mut self) -> impl Future<Output = Option<io::Result<String>>> + Send;
}

impl LineSource for mpsc::Receiver<String> {
    async fn next_line(&mut self) -> Option<io::Result<String>> {
        self.recv().await.map(Ok)
    }
}

// ---------------------------------------------------------------------------
// Config / errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FollowConfig {
    /// Longest a follower sleeps at end-of-file before re-reading.
    pub poll_interval: Duration,
    /// Try to register a native watcher for early wake-ups.
    pub native_watch: bool,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self::from(&TrackingConfig::default())
    }
}

impl From<&TrackingConfig> for FollowConfig {
    fn from(tracking: &TrackingConfig) -> Self {
        Self {
            poll_interval: tracking.poll_interval(),
            native_watch: tracking.native_watch,
        }
    }
}

#[derive(Debug, Error)]
pub enum FollowError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),
}

// ---------------------------------------------------------------------------
// Follower
// ---------------------------------------------------------------------------

enum Wake {
    Poll,
    Native {
        // Dropping the watcher unregisters it.
        _watcher: RecommendedWatcher,
        events: mpsc::Receiver<()>,
    },
}

/// Follows one file. Owned by exactly one tracker; dropping it releases the
/// file handle and the watcher.
pub struct Follower {
    path: PathBuf,
    reader: BufReader<File>,
    pending: Vec<u8>,
    poll_interval: Duration,
    wake: Wake,
}

impl Follower {
    /// Open `path` for following, starting at its first byte.
    ///
    /// Fails if the file cannot be opened or is not a regular file. A native
    /// watcher that cannot be registered is not an error; the follower falls
    /// back to polling.
    pub async fn open(path: impl AsRef<Path>, config: &FollowConfig) -> Result<Self, FollowError> {
        let path = path.as_ref().to_path_buf();
        let open_error = |source| FollowError::Open {
            path: path.clone(),
            source,
        };

        let file = File::open(&path).await.map_err(open_error)?;
        let metadata = file.metadata().await.map_err(open_error)?;
        if !metadata.is_file() {
            return Err(FollowError::NotAFile(path));
        }

        let wake = if config.native_watch {
            native_wake(&path).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "native watch unavailable, polling");
                Wake::Poll
            })
        } else {
            Wake::Poll
        };

        debug!(
            path = %path.display(),
            native = matches!(wake, Wake::Native { .. }),
            "following file"
        );

        Ok(Self {
            path,
            reader: BufReader::new(file),
            pending: Vec::new(),
            poll_interval: config.poll_interval,
            wake,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for the next complete line. Never returns at end-of-file; only
    /// an I/O error ends the follow.
    pub async fn read_line(&mut self) -> io::Result<String> {
        loop {
            self.reader.read_until(b'\n', &mut self.pending).await?;

            if self.pending.last() == Some(&b'\n') {
                let mut line = std::mem::take(&mut self.pending);
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(String::from_utf8_lossy(&line).into_owned());
            }

            // read_until only stops short of the delimiter at end-of-file.
            self.wait_for_growth().await;
        }
    }

    async fn wait_for_growth(&mut self) {
        let mut watcher_gone = false;

        match &mut self.wake {
            Wake::Poll => tokio::time::sleep(self.poll_interval).await,
            Wake::Native { events, .. } => {
                tokio::select! {
                    event = events.recv() => match event {
                        Some(()) => while events.try_recv().is_ok() {},
                        None => watcher_gone = true,
                    },
                    _ = tokio::time::sleep(self.poll_interval) => {}
                }
            }
        }

        if watcher_gone {
            warn!(path = %self.path.display(), "file watcher stopped, polling");
            self.wake = Wake::Poll;
        }
    }
}

impl LineSource for Follower {
    async fn next_line(&mut self) -> Option<io::Result<String>> {
        Some(self.read_line().await)
    }
}

/// At most one wake-up is ever queued; further events coalesce into it.
const WAKE_CAPACITY: usize = 1;

fn native_wake(path: &Path) -> notify::Result<Wake> {
    let (tx, rx) = mpsc::channel(WAKE_CAPACITY);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any | EventKind::Other
                ) {
                    // Full means a wake-up is already pending.
                    let _ = tx.try_send(());
                }
            }
            Err(err) => warn!(error = %err, "file watcher error"),
        }
    })?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;

    Ok(Wake::Native {
        _watcher: watcher,
        events: rx,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
