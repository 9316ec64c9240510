//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{PodnewsError, Result};
use std::process::Command;
use tracing::warn;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// The API server needs generation and, ideally, the audio fallback.
    Serve,
    /// Transcript extraction needs only captions, but may fall back to audio.
    Transcript,
    /// Generation requires the OpenAI key.
    Generate,
}

/// Run pre-flight checks for the given operation.
///
/// Missing fallback tools are reported as warnings. A missing OpenAI key
/// fails `Serve` and `Generate`.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Serve | Operation::Generate => {
            settings.capabilities()?;
        }
        Operation::Transcript => {}
    }

    if settings.credentials.deepgram_api_key.is_some() {
        for tool in ["yt-dlp", "ffmpeg"] {
            if let Err(e) = check_tool(tool) {
                warn!("Audio fallback may not work: {}", e);
            }
        }
    }

    Ok(())
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    // ffmpeg uses -version (single dash), yt-dlp uses --version
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(PodnewsError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(PodnewsError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(PodnewsError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_requires_openai_key() {
        let settings = Settings::default();
        assert!(matches!(
            check(Operation::Generate, &settings),
            Err(PodnewsError::Config(_))
        ));
    }

    #[test]
    fn test_transcript_without_keys_passes() {
        let settings = Settings::default();
        assert!(check(Operation::Transcript, &settings).is_ok());
    }

    #[test]
    fn test_missing_tool() {
        assert!(matches!(
            check_tool("podnews-no-such-tool"),
            Err(PodnewsError::ToolNotFound(_))
        ));
    }
}
