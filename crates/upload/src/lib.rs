//! Video upload client for the Wistia hosting API.
//!
//! One POST of multipart form data to the upload endpoint; everything
//! else is validation and response shaping. Credentials come from the
//! environment (`WISTIA_API_TOKEN`, optional `WISTIA_ACCOUNT`).

/// Upload request/response handling.
pub mod client;
/// Error taxonomy and failure emission.
pub mod error;
/// Pre-flight validation of parameters and environment.
pub mod validate;

pub use error::{Result, UploadError};
