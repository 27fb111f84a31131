//! Files handed over by the user for ingestion.

use serde::{Deserialize, Serialize};

/// One user-selected file, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// File name as shown to the user
    pub name: String,
    /// Declared media type (from the picker or inferred from the extension)
    pub mime_type: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}
