//! Secret management service trait.
//!
//! Defines the interface for loading the generation-service credential.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for resolving secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Secrets are loaded from the environment or a user-private file
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Returns the Gemini API key, or a `Config` error when none is configured.
    async fn gemini_api_key(&self) -> Result<String> {
        self.load_secrets()
            .await?
            .gemini
            .map(|gemini| gemini.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                crate::error::ScribeError::config(
                    "Gemini API key not found (set GEMINI_API_KEY or add it to secret.json)",
                )
            })
    }
}
