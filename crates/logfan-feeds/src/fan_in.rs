//! Fan-in — merge many result channels into one.
//!
//! [`merge`] spawns one forwarding leg per input channel onto a [`JoinSet`].
//! Each leg moves items from its input to the shared output, racing the
//! cancellation token on every receive and every send. A separate join task
//! owns the original output sender and drops it only after every leg has
//! finished, so the consumer sees the output close exactly once, after the
//! last item.
//!
//! Items from one input keep their order; items from different inputs
//! interleave in whatever order they arrive.

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::tracker::HANDOFF_CAPACITY;

/// Merge `channels` into a single receiver.
///
/// With no inputs the returned receiver is already closed.
pub fn merge<T>(cancel: CancellationToken, channels: Vec<mpsc::Receiver<T>>) -> mpsc::Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
    let mut legs = JoinSet::new();

    for (leg, input) in channels.into_iter().enumerate() {
        legs.spawn(forward(leg, input, tx.clone(), cancel.clone()));
    }

    tokio::spawn(async move {
        while let Some(joined) = legs.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "forwarding leg failed");
            }
        }
        debug!("all forwarding legs finished, closing merged stream");
        drop(tx);
    });

    rx
}

async fn forward<T>(
    leg: usize,
    mut input: mpsc::Receiver<T>,
    output: mpsc::Sender<T>,
    cancel: CancellationToken,
) {
    loop {
        let item = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            item = input.recv() => item,
        };
        let Some(item) = item else {
            debug!(leg, "input closed");
            break;
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = output.send(item) => {
                if sent.is_err() {
                    debug!(leg, "merged receiver dropped");
                    break;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
