//! Error types for Podnews.

use thiserror::Error;

/// Library-level error type for Podnews operations.
#[derive(Error, Debug)]
pub enum PodnewsError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Failed to generate news articles: {0}")]
    GenerationFailed(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Unsupported format: {0}. Format must be 'txt' or 'docx'")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Caption fetch failed: {0}")]
    Captions(String),

    #[error("Audio download failed: {0}")]
    AudioDownload(String),

    #[error("Speech-to-text failed: {0}")]
    SpeechToText(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Document export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),
}

impl PodnewsError {
    /// Whether the error was caused by the caller's input rather than by
    /// this process or one of its providers.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PodnewsError::InvalidUrl(_)
                | PodnewsError::InvalidInput(_)
                | PodnewsError::UnsupportedFormat(_)
                | PodnewsError::NotFound(_)
        )
    }
}

/// Result type alias for Podnews operations.
pub type Result<T> = std::result::Result<T, PodnewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(PodnewsError::InvalidUrl("x".into()).is_client_error());
        assert!(PodnewsError::NotFound("Session".into()).is_client_error());
        assert!(!PodnewsError::Export("zip".into()).is_client_error());
        assert!(!PodnewsError::TranscriptUnavailable("none".into()).is_client_error());
    }

    #[test]
    fn test_not_found_message() {
        let err = PodnewsError::NotFound("Session".into());
        assert_eq!(err.to_string(), "Session not found");
    }
}
