//! logfan-core — types, line parsers and configuration for logfan.
//!
//! This crate holds everything in the pipeline that does not touch a file
//! handle or a task: descriptor validation, the per-format line parsers, the
//! record and error types carried on every channel, and the layered config.
//!
//! # Pipeline
//!
//! ```text
//! descriptors ──► Supervisor ──► Tracker × N ──► fan-in ──► sink
//!                                   │
//!                                   └──► parser::parse (this crate)
//! ```
//!
//! The concurrent half lives in `logfan-feeds`.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod parser;
pub mod types;

pub use error::{DescriptorError, FileListError, LineError, TimestampError};
pub use types::{LogDescriptor, LogFormat, LogRecord, TrackingResult};
