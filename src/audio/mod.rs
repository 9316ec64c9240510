//! Audio download for the speech-to-text fallback.

mod downloader;

pub use downloader::YtDlpDownloader;

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Downloads the audio track of a video into a directory.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Download the best available audio for `url` into `output_dir` and
    /// return the path of the resulting file.
    async fn fetch_audio(&self, url: &str, output_dir: &Path) -> Result<PathBuf>;
}
