//! Writes reports and audio overviews to disk on request.
//!
//! Nothing is written automatically; these are the download actions of the
//! report view.

use scribe_core::audio::PcmAudio;
use scribe_core::error::{Result, ScribeError};
use scribe_core::session::Report;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes the report markdown into `dir` under its download file name.
pub async fn export_report_markdown(report: &Report, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report.download_file_name());
    write_bytes(&path, report.markdown.as_bytes()).await?;
    tracing::info!("[Export] Report written to {}", path.display());
    Ok(path)
}

/// Writes the report markdown to an explicit path.
pub async fn write_report_markdown(report: &Report, path: &Path) -> Result<()> {
    write_bytes(path, report.markdown.as_bytes()).await?;
    tracing::info!("[Export] Report written to {}", path.display());
    Ok(())
}

/// Writes the audio overview as a WAV file.
pub async fn write_audio_wav(audio: &PcmAudio, path: &Path) -> Result<()> {
    write_bytes(path, &audio.to_wav()).await?;
    tracing::info!(
        "[Export] Audio overview ({:.1}s) written to {}",
        audio.duration().as_secs_f64(),
        path.display()
    );
    Ok(())
}

async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, bytes)
        .await
        .map_err(|e| ScribeError::io(format!("Failed to write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_report_uses_download_name() {
        let temp_dir = TempDir::new().unwrap();
        let report = Report::new("# Executive Summary\n");

        let path = export_report_markdown(&report, temp_dir.path()).await.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            report.download_file_name()
        );
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Executive Summary\n"
        );
    }

    #[tokio::test]
    async fn test_write_audio_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("overview.wav");
        let audio = PcmAudio::from_bytes(vec![0, 0, 1, 0], 24_000, 1).unwrap();

        write_audio_wav(&audio, &path).await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(bytes.len(), 44 + 4);
    }
}
