//! logfan-feeds — the concurrent half of logfan.
//!
//! Each tracked file gets a [`Follower`](follow::Follower) wrapped in a
//! tracker task that parses every line and emits a
//! [`TrackingResult`](logfan_core::TrackingResult) on its own channel. The
//! [`Supervisor`] starts the trackers and [`fan_in::merge`] joins their
//! channels into one stream. A single `CancellationToken` stops all of it.

pub mod error;
pub mod fan_in;
pub mod follow;
pub mod supervisor;
pub mod tracker;

pub use error::TrackError;
pub use follow::{FollowConfig, FollowError, Follower, LineSource};
pub use supervisor::{start_tracking, Supervisor, TrackingRun};
pub use tokio_util::sync::CancellationToken;
