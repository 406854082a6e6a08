//! Tracking supervisor — start one tracker per descriptor and merge them.
//!
//! Descriptors whose file cannot be followed are logged and skipped. If none
//! can be followed the run fails with [`TrackError::NoStreams`] and no
//! channel is returned. Otherwise the trackers' channels are merged by
//! [`fan_in::merge`] under the run's single cancellation token.

use logfan_core::{LogDescriptor, TrackingResult};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::TrackError;
use crate::fan_in;
use crate::follow::FollowConfig;
use crate::tracker;

/// Starts tracking runs with a shared [`FollowConfig`].
#[derive(Debug, Clone, Default)]
pub struct Supervisor {
    follow: FollowConfig,
}

impl Supervisor {
    pub fn new(follow: FollowConfig) -> Self {
        Self { follow }
    }

    /// Start a run that owns its own cancellation token.
    pub async fn start(&self, descriptors: &[LogDescriptor]) -> Result<TrackingRun, TrackError> {
        let cancel = CancellationToken::new();
        let results = self.start_tracking(descriptors, &cancel).await?;
        Ok(TrackingRun { results, cancel })
    }

    /// Start one tracker per descriptor under `cancel` and return the merged
    /// result stream.
    pub async fn start_tracking(
        &self,
        descriptors: &[LogDescriptor],
        cancel: &CancellationToken,
    ) -> Result<mpsc::Receiver<TrackingResult>, TrackError> {
        let mut streams = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            match tracker::track(descriptor, cancel.clone(), &self.follow).await {
                Ok(stream) => streams.push(stream),
                Err(err) => warn!(error = %err, "skipping descriptor"),
            }
        }

        if streams.is_empty() {
            return Err(TrackError::NoStreams);
        }

        info!(
            tracked = streams.len(),
            requested = descriptors.len(),
            "tracking started"
        );
        Ok(fan_in::merge(cancel.clone(), streams))
    }
}

/// Start a run with the default [`FollowConfig`].
pub async fn start_tracking(descriptors: &[LogDescriptor]) -> Result<TrackingRun, TrackError> {
    Supervisor::default().start(descriptors).await
}

// ---------------------------------------------------------------------------
// TrackingRun
// ---------------------------------------------------------------------------

/// A live run: the merged result stream plus the token that stops it.
///
/// Dropping the run cancels it.
#[derive(Debug)]
pub struct TrackingRun {
    results: mpsc::Receiver<TrackingResult>,
    cancel: CancellationToken,
}

impl TrackingRun {
    /// Next result, or `None` once every tracker has stopped.
    pub async fn recv(&mut self) -> Option<TrackingResult> {
        self.results.recv().await
    }

    /// Ask every tracker and forwarding leg to stop. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A handle on the run's token, e.g. for a signal handler.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn results(&mut self) -> &mut mpsc::Receiver<TrackingResult> {
        &mut self.results
    }
}

impl Drop for TrackingRun {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use logfan_core::LogFormat;

    #[tokio::test]
    async fn empty_descriptor_list_has_no_streams() {
        let err = start_tracking(&[]).await.err().unwrap();
        assert!(matches!(err, TrackError::NoStreams));
    }

    #[tokio::test]
    async fn all_unreachable_descriptors_have_no_streams() {
        let descriptors = vec![
            LogDescriptor::new("/nonexistent/logfan/a.log", LogFormat::FirstFormat).unwrap(),
            LogDescriptor::new("/nonexistent/logfan/b.log", LogFormat::SecondFormat).unwrap(),
        ];
        let err = start_tracking(&descriptors).await.err().unwrap();
        assert_eq!(err.to_string(), "no log streams are available");
    }
}
