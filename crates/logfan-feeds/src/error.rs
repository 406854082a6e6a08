//! Errors raised while starting a tracking run.

use logfan_core::LogDescriptor;
use thiserror::Error;

use crate::follow::FollowError;

#[derive(Debug, Error)]
pub enum TrackError {
    /// One file could not be followed. The supervisor logs this and carries
    /// on with the remaining descriptors.
    #[error("error on tracking file {descriptor}: {source}")]
    Open {
        descriptor: LogDescriptor,
        #[source]
        source: FollowError,
    },
    /// Not a single descriptor could be followed.
    #[error("no log streams are available")]
    NoStreams,
}
