//! Transcript resolution for YouTube videos.
//!
//! Captions are fetched directly when the video has them. Otherwise the audio
//! track is downloaded and sent to a speech-to-text provider.

mod captions;
mod deepgram;
mod resolver;

pub use captions::YoutubeCaptions;
pub use deepgram::DeepgramTranscriber;
pub use resolver::{AudioFallback, TranscriptResolver};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single caption line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

impl CaptionSegment {
    pub fn new(text: impl Into<String>, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
            duration_seconds,
        }
    }
}

/// Join caption segments into plain text, separated by single spaces.
pub fn join_segments(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Source of published captions for a video.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch captions for `video_id`, preferring `languages` in order.
    async fn fetch_captions(&self, video_id: &str, languages: &[String]) -> Result<Vec<CaptionSegment>>;
}

/// Speech-to-text provider.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe raw audio bytes of the given MIME type.
    async fn transcribe(&self, audio: Vec<u8>, mime_type: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_segments() {
        let segments = vec![
            CaptionSegment::new("hello there", 0.0, 1.5),
            CaptionSegment::new("general", 1.5, 1.0),
            CaptionSegment::new("kenobi ", 2.5, 1.0),
        ];
        assert_eq!(join_segments(&segments), "hello there general kenobi");
    }

    #[test]
    fn test_join_no_segments() {
        assert_eq!(join_segments(&[]), "");
    }
}
