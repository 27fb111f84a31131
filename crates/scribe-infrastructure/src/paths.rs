//! Path management for scribe configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/scribe/
//! └── secret.json              # Gemini API key
//! ```
//!
//! Sessions are never written to disk, so the config directory holds only the
//! credential file.

use scribe_core::error::{Result, ScribeError};
use std::path::PathBuf;

const APP_DIR: &str = "scribe";
const SECRET_FILE: &str = "secret.json";

pub struct ScribePaths;

impl ScribePaths {
    /// Returns the scribe configuration directory (`~/.config/scribe`).
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScribeError::config("Cannot find home directory"))?;
        Ok(home.join(".config").join(APP_DIR))
    }

    /// Returns the path of `secret.json`.
    pub fn secret_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(SECRET_FILE))
    }
}
