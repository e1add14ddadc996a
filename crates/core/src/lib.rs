//! Shared plumbing for the opkit command-line tools.
//!
//! Every binary in this workspace speaks the same output contract: exactly
//! one JSON document per invocation, on stdout for success and on stderr
//! (with exit code 1) for failure. This crate owns that contract plus the
//! tracing setup; everything domain-specific lives in the tool crates.

/// Tracing initialization shared by every binary.
pub mod logging;
/// Structured success/failure emission.
pub mod outcome;

pub use outcome::{Failure, emit_success};
