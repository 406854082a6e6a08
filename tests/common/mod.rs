//! Shared test utilities for logfan integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every async helper is bounded by [`WAIT`] so a broken
//! pipeline fails the test instead of hanging it.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
