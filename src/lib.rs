//! logfan — tail a set of log files and fan every parsed line into one stream.
//!
//! This crate re-exports the two library crates so that integration tests and
//! benches can import everything from one place, and adds the [`sink`] that
//! the binary drains a run into.
//!
//! # Architecture
//!
//! ```text
//! descriptors ──► Supervisor ──► Tracker × N ──► fan-in ──► sink
//! ```
//!
//! Every arrow after the supervisor is a one-slot `tokio` channel. One
//! `CancellationToken` per run stops every task.

pub mod sink;

pub use logfan_core::{
    config, descriptor, parser, DescriptorError, FileListError, LineError, LogDescriptor,
    LogFormat, LogRecord, TimestampError, TrackingResult,
};
pub use logfan_feeds::{
    fan_in, follow, start_tracking, tracker, CancellationToken, FollowConfig, FollowError,
    Follower, LineSource, Supervisor, TrackError, TrackingRun,
};
