//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::TranscriptResolver;
use crate::youtube::is_valid_youtube_url;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(url: &str, output: Option<String>, settings: Settings) -> Result<()> {
    if !is_valid_youtube_url(url) {
        Output::error(&format!("Invalid YouTube URL: {}", url));
        anyhow::bail!("Invalid YouTube URL: {}", url);
    }

    preflight::check(Operation::Transcript, &settings)?;
    let resolver = TranscriptResolver::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = resolver.resolve(url).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(transcript) => transcript,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    match output {
        Some(path) => {
            tokio::fs::write(&path, &transcript).await?;
            Output::success(&format!(
                "Wrote transcript ({} words) to {}",
                transcript.split_whitespace().count(),
                path
            ));
        }
        None => println!("{}", transcript),
    }

    Ok(())
}
