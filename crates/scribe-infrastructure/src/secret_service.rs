//! Secret service implementation.
//!
//! Resolves the Gemini API key from the environment first and falls back to
//! `~/.config/scribe/secret.json`.

use crate::paths::ScribePaths;
use scribe_core::config::{GeminiConfig, SecretConfig};
use scribe_core::error::{Result, ScribeError};
use scribe_core::secret::SecretService;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Service for loading secret configuration.
///
/// The resolved configuration is cached after the first successful load.
///
/// # Example
///
/// ```ignore
/// use scribe_infrastructure::SecretServiceImpl;
/// use scribe_core::secret::SecretService;
///
/// let service = SecretServiceImpl::default()?;
/// let key = service.gemini_api_key().await?;
/// ```
pub struct SecretServiceImpl {
    secret_path: PathBuf,
    env_vars: Vec<String>,
    secrets: RwLock<Option<SecretConfig>>,
}

impl SecretServiceImpl {
    /// Creates a service reading `~/.config/scribe/secret.json`.
    pub fn default() -> Result<Self> {
        Ok(Self::with_path(ScribePaths::secret_file()?))
    }

    /// Creates a service reading the given secret file.
    pub fn with_path(secret_path: impl Into<PathBuf>) -> Self {
        Self {
            secret_path: secret_path.into(),
            env_vars: API_KEY_ENV_VARS.iter().map(|v| v.to_string()).collect(),
            secrets: RwLock::new(None),
        }
    }

    /// Replaces the environment variables consulted before the file.
    pub fn with_env_vars(mut self, env_vars: Vec<String>) -> Self {
        self.env_vars = env_vars;
        self
    }

    fn from_env(&self) -> Option<SecretConfig> {
        self.env_vars.iter().find_map(|name| {
            let value = std::env::var(name).ok()?;
            if value.trim().is_empty() {
                return None;
            }
            tracing::debug!("[SecretService] Using API key from ${}", name);
            Some(SecretConfig {
                gemini: Some(GeminiConfig {
                    api_key: value.trim().to_string(),
                }),
            })
        })
    }

    async fn from_file(&self) -> Result<SecretConfig> {
        let content = match tokio::fs::read_to_string(&self.secret_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "[SecretService] No secret file at {}",
                    self.secret_path.display()
                );
                return Ok(SecretConfig::default());
            }
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            ScribeError::config(format!(
                "Failed to parse secret file at {}: {}",
                self.secret_path.display(),
                e
            ))
        })
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = match self.from_env() {
            Some(config) => config,
            None => self.from_file().await?,
        };

        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }
}
