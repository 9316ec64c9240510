//! YouTube URL validation and video ID extraction.
//!
//! Validation and extraction share one compiled pattern, so a URL is
//! accepted exactly when an ID can be pulled out of it.

use crate::error::{PodnewsError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Recognized URL shapes: `watch?v=`, `youtu.be/` and `embed/`, over http or
/// https, with an optional `www.` prefix.
static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^https?://
        (?:www\.)?
        (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)
        ([\w-]+)
    ",
    )
    .expect("YouTube URL pattern is valid")
});

/// Check whether a string is a recognized YouTube video URL.
pub fn is_valid_youtube_url(url: &str) -> bool {
    YOUTUBE_URL.is_match(url.trim())
}

/// Extract the video ID from a YouTube URL.
pub fn extract_video_id(url: &str) -> Result<String> {
    YOUTUBE_URL
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| PodnewsError::InvalidUrl(url.to_string()))
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
