//! Reads user-selected files from disk.

use scribe_core::error::{Result, ScribeError};
use scribe_core::upload::SelectedFile;
use std::path::Path;
use tokio::fs;

/// Infers the MIME type from a filename extension using the `mime_guess` library.
fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Reads one file into memory with an inferred media type.
pub async fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let data = fs::read(path).await.map_err(|e| {
        ScribeError::io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile::new(name, infer_mime_type(path), data))
}

/// Reads all files in selection order.
///
/// Fails on the first unreadable file; type filtering is left to ingestion.
pub async fn read_selected_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SelectedFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_selected_file(path.as_ref()).await?);
    }
    tracing::debug!("[FileSource] Read {} file(s)", files.len());
    Ok(files)
}
