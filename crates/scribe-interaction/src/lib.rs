//! Interaction layer for Scribe.
//!
//! Provides the hosted-model client that implements
//! [`scribe_core::generation::GenerativeService`].

pub mod gemini_api_client;
pub mod supported_models;

pub use gemini_api_client::GeminiApiClient;
