//! Command-line tools for driving one long-lived, remote-debuggable
//! browser process from independent, short-lived command invocations.
//!
//! The lifecycle protocol lives in [`session`]: `browser-start` launches
//! a detached browser and writes a session handle to a fixed path in the
//! home directory; every other command attaches through that handle; and
//! `browser-close` tears the process down and deletes it. The devtools
//! protocol itself is delegated to `chromiumoxide`.

/// The command surface backing each binary.
pub mod commands;
/// Error taxonomy and failure emission.
pub mod error;
/// Platform-conditional executable/profile lookup.
pub mod platform;
/// Process signalling primitives.
pub mod process;
/// Transient profile copy management.
pub mod profile;
/// Session handle lifecycle.
pub mod session;
/// clap help styling.
pub mod styles;

pub use error::{BrowserError, Result};
