//! Audio download via yt-dlp, with ffmpeg normalization.

use super::AudioFetcher;
use crate::config::AudioSettings;
use crate::error::{PodnewsError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Base name of the downloaded file inside the output directory.
const AUDIO_STEM: &str = "audio";

/// Downloads the best audio stream with yt-dlp and transcodes it.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    format: String,
    quality: String,
}

impl YtDlpDownloader {
    pub fn new(settings: &AudioSettings) -> Self {
        Self {
            format: settings.format.clone(),
            quality: settings.quality.clone(),
        }
    }

    /// Arguments passed to yt-dlp for a download into `template`.
    fn ytdlp_args(&self, url: &str, template: &Path) -> Vec<String> {
        vec![
            "--format".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            self.format.clone(),
            "--audio-quality".to_string(),
            self.quality.clone(),
            "--output".to_string(),
            template.to_string_lossy().to_string(),
            "--no-playlist".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            url.to_string(),
        ]
    }
}

impl Default for YtDlpDownloader {
    fn default() -> Self {
        Self::new(&AudioSettings::default())
    }
}

#[async_trait]
impl AudioFetcher for YtDlpDownloader {
    #[instrument(skip(self, output_dir))]
    async fn fetch_audio(&self, url: &str, output_dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(output_dir).await?;

        let target_path = output_dir.join(format!("{}.{}", AUDIO_STEM, self.format));
        let template = output_dir.join(format!("{}.%(ext)s", AUDIO_STEM));

        info!("Downloading audio from {}", url);

        let result = Command::new("yt-dlp")
            .args(self.ytdlp_args(url, &template))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PodnewsError::ToolNotFound("yt-dlp".into()));
            }
            Err(e) => {
                return Err(PodnewsError::AudioDownload(format!("yt-dlp execution failed: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PodnewsError::AudioDownload(format!("yt-dlp failed: {}", stderr.trim())));
        }

        // Extraction can leave the original container behind if the
        // postprocessor was skipped.
        let downloaded = find_audio_file(output_dir, AUDIO_STEM).await?;

        if downloaded != target_path {
            transcode(&downloaded, &target_path).await?;
            let _ = tokio::fs::remove_file(&downloaded).await;
        }

        Ok(target_path)
    }
}

/// Locates a downloaded audio file by its stem.
async fn find_audio_file(dir: &Path, stem: &str) -> Result<PathBuf> {
    for ext in &["mp3", "opus", "m4a", "webm", "ogg"] {
        let candidate = dir.join(format!("{}.{}", stem, ext));
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return Ok(candidate);
        }
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| PodnewsError::AudioDownload(format!("Cannot read directory: {e}")))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PodnewsError::AudioDownload(format!("Cannot read directory: {e}")))?
    {
        if entry.file_name().to_string_lossy().starts_with(stem) {
            return Ok(entry.path());
        }
    }

    Err(PodnewsError::AudioDownload("Audio file not found after download".into()))
}

/// Converts an audio file to the target codec using ffmpeg.
async fn transcode(source: &Path, dest: &Path) -> Result<()> {
    debug!("Converting {:?} to {:?}", source, dest);

    let result = Command::new("ffmpeg")
        .arg("-i").arg(source)
        .arg("-vn")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(PodnewsError::AudioDownload(format!("ffmpeg conversion failed: {err}")))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(PodnewsError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(PodnewsError::AudioDownload(format!("ffmpeg error: {e}"))),
    }
}
