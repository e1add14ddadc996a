//! Browser session lifecycle subsystem.
//!
//! Independent, short-lived command invocations coordinate one long-lived
//! browser process through a single on-disk handle: created by start,
//! read by every attaching command, deleted by close. Handle presence is
//! the sole source of truth for "a session is active"; a dead process
//! behind a live handle is only discovered when a command tries to use
//! the stored endpoint.

/// Connect/attach helpers shared across commands.
pub mod connector;
/// Remote-debugging endpoint discovery.
pub mod endpoint;
/// Persisted session handle schema.
pub mod handle;
/// Detached browser launch.
pub mod launcher;
/// Handle persistence.
pub mod repository;
/// Bounded wait-for-exit used by close.
pub mod shutdown;

pub use connector::BrowserConnection;
pub use handle::SessionHandle;
pub use repository::SessionRepository;
