//! File trackers — one task per descriptor, turning raw lines into
//! [`TrackingResult`]s on a dedicated channel.
//!
//! A tracker waits on two things at once: the shared cancellation token and
//! the next line from its [`LineSource`]. Every line is parsed with the
//! descriptor's format and handed to the output channel; the hand-off itself
//! also races the token, so a tracker never blocks forever on a reader that
//! has stopped reading.
//!
//! A tracker ends when the token is cancelled, when its source is exhausted
//! or fails, or when nobody holds the receiver any more. On every exit path
//! the source is dropped (releasing the file) and the sender is dropped
//! (closing the channel) exactly once.

use logfan_core::{parser, LogDescriptor, TrackingResult};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::TrackError;
use crate::follow::{FollowConfig, Follower, LineSource};

/// Capacity of every channel in the pipeline. One slot is the closest tokio
/// gets to an unbuffered hand-off.
pub const HANDOFF_CAPACITY: usize = 1;

/// Start following `descriptor` and return the receiving end of its result
/// channel.
///
/// Fails immediately, without spawning anything, if the file cannot be
/// opened for following.
pub async fn track(
    descriptor: &LogDescriptor,
    cancel: CancellationToken,
    follow: &FollowConfig,
) -> Result<mpsc::Receiver<TrackingResult>, TrackError> {
    let follower = Follower::open(descriptor.full_path(), follow)
        .await
        .map_err(|source| TrackError::Open {
            descriptor: descriptor.clone(),
            source,
        })?;

    Ok(spawn_tracker(follower, descriptor.clone(), cancel))
}

/// Spawn the tracker task over an already-open line source.
///
/// Every line the source yields produces exactly one result on the returned
/// channel, in source order, until the tracker stops.
pub fn spawn_tracker<S: LineSource>(
    mut source: S,
    descriptor: LogDescriptor,
    cancel: CancellationToken,
) -> mpsc::Receiver<TrackingResult> {
    let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);

    tokio::spawn(async move {
        let path = descriptor.full_path();
        let format = descriptor.format();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(path = %path.display(), "tracker cancelled");
                    break;
                }
                next = source.next_line() => next,
            };

            let line = match next {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    warn!(path = %path.display(), error = %err, "follow failed, tracker stopping");
                    break;
                }
                None => {
                    debug!(path = %path.display(), "line source exhausted");
                    break;
                }
            };

            let result = parser::parse(&line, path, format);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(path = %path.display(), "tracker cancelled during hand-off");
                    break;
                }
                sent = tx.send(result) => {
                    if sent.is_err() {
                        debug!(path = %path.display(), "result receiver dropped");
                        break;
                    }
                }
            }
        }

        drop(source);
        drop(tx);
    });

    rx
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
