//! Infrastructure layer for Scribe: secrets, file input and export.

pub mod export;
pub mod file_source;
pub mod paths;
pub mod secret_service;

pub use crate::paths::ScribePaths;
pub use crate::secret_service::SecretServiceImpl;
