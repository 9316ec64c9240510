//! Two-tier transcript resolution: captions first, then audio transcription.

use super::{join_segments, CaptionSource, DeepgramTranscriber, SpeechToText, YoutubeCaptions};
use crate::audio::{AudioFetcher, YtDlpDownloader};
use crate::config::Settings;
use crate::error::{PodnewsError, Result};
use crate::youtube::{extract_video_id, watch_url};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// MIME type of the audio handed to the speech-to-text provider.
const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Audio download + speech-to-text, used when captions are unavailable.
pub struct AudioFallback {
    audio: Arc<dyn AudioFetcher>,
    speech: Arc<dyn SpeechToText>,
    temp_root: PathBuf,
}

impl AudioFallback {
    pub fn new(audio: Arc<dyn AudioFetcher>, speech: Arc<dyn SpeechToText>, temp_root: PathBuf) -> Self {
        Self {
            audio,
            speech,
            temp_root,
        }
    }

    /// Download the audio into a scoped temp directory and transcribe it.
    ///
    /// The directory is removed when it goes out of scope, on every path.
    async fn transcribe(&self, video_id: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.temp_root).await?;
        let temp_root = self.temp_root.clone();
        let workdir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new().prefix("podnews-").tempdir_in(temp_root)
        })
        .await
        .map_err(std::io::Error::other)??;

        let audio_path = self.audio.fetch_audio(&watch_url(video_id), workdir.path()).await?;
        let audio = tokio::fs::read(&audio_path).await?;

        let transcript = self.speech.transcribe(audio, AUDIO_MIME_TYPE).await?;
        let transcript = transcript.trim().to_string();

        if transcript.is_empty() {
            return Err(PodnewsError::SpeechToText("Empty transcript".to_string()));
        }

        Ok(transcript)
    }
}

/// Resolves a YouTube URL into transcript text.
pub struct TranscriptResolver {
    captions: Arc<dyn CaptionSource>,
    fallback: Option<AudioFallback>,
    languages: Vec<String>,
}

impl TranscriptResolver {
    pub fn new(captions: Arc<dyn CaptionSource>, languages: Vec<String>) -> Self {
        Self {
            captions,
            fallback: None,
            languages,
        }
    }

    /// Build the production resolver.
    ///
    /// The audio fallback is only wired in when a Deepgram key is available.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let captions = Arc::new(YoutubeCaptions::new()?);
        let resolver = Self::new(captions, settings.captions.languages.clone());

        match &settings.credentials.deepgram_api_key {
            Some(key) => {
                let fallback = AudioFallback::new(
                    Arc::new(YtDlpDownloader::new(&settings.audio)),
                    Arc::new(DeepgramTranscriber::new(key, &settings.speech)),
                    settings.temp_dir(),
                );
                Ok(resolver.with_fallback(fallback))
            }
            None => {
                warn!("DEEPGRAM_API_KEY not set; audio transcription fallback disabled");
                Ok(resolver)
            }
        }
    }

    /// Enable the audio transcription fallback.
    pub fn with_fallback(mut self, fallback: AudioFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Whether the audio fallback is configured.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Resolve the transcript for a YouTube URL.
    ///
    /// Each strategy is attempted exactly once.
    #[instrument(skip(self))]
    pub async fn resolve(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)?;

        let caption_error = match self.captions.fetch_captions(&video_id, &self.languages).await {
            Ok(segments) => {
                let text = join_segments(&segments);
                if !text.is_empty() {
                    info!("Resolved transcript from captions ({} segments)", segments.len());
                    return Ok(text);
                }
                "captions were empty".to_string()
            }
            Err(e) => e.to_string(),
        };

        warn!("Caption fetch failed for {}: {}", video_id, caption_error);

        let fallback = self.fallback.as_ref().ok_or_else(|| {
            PodnewsError::TranscriptUnavailable(format!(
                "{}; audio fallback disabled (DEEPGRAM_API_KEY not set)",
                caption_error
            ))
        })?;

        info!("Falling back to audio transcription");

        fallback.transcribe(&video_id).await.map_err(|e| {
            PodnewsError::TranscriptUnavailable(format!(
                "{}; audio fallback failed: {}",
                caption_error, e
            ))
        })
    }
}
