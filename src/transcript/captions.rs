//! YouTube caption fetching.

use super::{CaptionSegment, CaptionSource};
use crate::error::{PodnewsError, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetches published or auto-generated captions from YouTube.
pub struct YoutubeCaptions {
    api: YouTubeTranscriptApi,
}

impl YoutubeCaptions {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| PodnewsError::Captions(format!("Failed to create caption client: {}", e)))?;

        Ok(Self { api })
    }
}

#[async_trait]
impl CaptionSource for YoutubeCaptions {
    #[instrument(skip(self))]
    async fn fetch_captions(&self, video_id: &str, languages: &[String]) -> Result<Vec<CaptionSegment>> {
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| PodnewsError::Captions(e.to_string()))?;

        debug!(
            "Fetched {} caption snippets ({})",
            transcript.snippets.len(),
            transcript.language_code
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|s| CaptionSegment::new(s.text, s.start, s.duration))
            .collect())
    }
}
