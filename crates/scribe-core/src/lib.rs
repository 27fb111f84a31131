//! Domain layer for Scribe.
//!
//! Sessions, images, reports and the generation-service boundary. Nothing in
//! this crate performs I/O; the hosted model is reached through
//! [`generation::GenerativeService`] implementations provided elsewhere.

pub mod audio;
pub mod config;
pub mod error;
pub mod generation;
pub mod secret;
pub mod session;
pub mod speaker;
pub mod upload;

// Re-export common error type
pub use error::ScribeError;
